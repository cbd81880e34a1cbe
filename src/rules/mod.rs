//! Duel rules.
//!
//! Rule sets implement `RulesEngine` to define:
//! - How each queued command modifies state
//! - Turn changes and combat
//! - Win/loss conditions
//!
//! The threaded flow calls into `RulesEngine` but never interprets
//! rule-specific concepts directly.

pub mod engine;
pub mod standard;

pub use engine::{DuelResult, RuleViolation, RulesEngine};
pub use standard::StandardRules;
