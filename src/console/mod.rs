//! The interactive console.
//!
//! ## Key Types
//!
//! - `SessionDriver`: The poll/render/read/dispatch loop over an `EngineFacade`
//! - `ConsoleConfig`: Scenario path, poll interval, screen clearing
//! - `SessionOutcome`: How and why a session ended
//!
//! Rendering helpers live in `render` and write to any `io::Write`.

pub mod config;
pub mod driver;
pub mod render;

pub use config::ConsoleConfig;
pub use driver::{DriverError, DriverState, SessionDriver, SessionOutcome, TerminationCause};
