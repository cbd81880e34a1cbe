//! Player commands: canonical form and console-line validation.
//!
//! ## Key Types
//!
//! - `CommandName`: Engine-facing command names ("level-up", "play-card", ...)
//! - `Command`: Name + owner + resolved arguments, as queued to the engine
//! - `Directive`: What an accepted console line asks for
//! - `CommandRequest`: Engine command with positional arguments, pre-resolution
//! - `Rejection`: Why a line was refused, with the exact player-facing text

pub mod action;
pub mod validator;

pub use action::{Command, CommandArg, CommandName, UnknownCommandName};
pub use validator::{
    validate, CommandRequest, Directive, ObservedBounds, Rejection, Verb, HELP_LINE,
};
