//! Running duels.
//!
//! ## Key Types
//!
//! - `EngineFacade`: Query + enqueue contract the console drives
//! - `DuelFlow`: A `RulesEngine` running on its own thread behind the facade
//! - `EngineError`: Start failures

pub mod facade;
pub mod flow;

pub use facade::{EngineError, EngineFacade};
pub use flow::{DuelFlow, DEFAULT_TICK};
