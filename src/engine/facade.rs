//! The narrow contract between the console and a running duel.
//!
//! The console never touches engine state directly. It reads through the
//! query methods, which return owned copies, and writes only by queueing
//! commands. Implementations must make `enqueue_command` return promptly and
//! deliver commands to the engine in submission order.

use thiserror::Error;

use crate::command::Command;
use crate::core::player::{Player, PlayerId};
use crate::core::state::{DuelSnapshot, TurnData};
use crate::zones::Field;

/// Why an engine could not be started.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine already started")]
    AlreadyStarted,

    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Read/write interface to a duel engine.
pub trait EngineFacade {
    /// Launch the engine's execution thread.
    ///
    /// The duel reports ongoing from the moment this returns `Ok`.
    fn start(&mut self) -> Result<(), EngineError>;

    /// Whether the duel is still running.
    fn is_ongoing(&self) -> bool;

    fn current_turn(&self) -> TurnData;

    fn opposing_player(&self, of: PlayerId) -> PlayerId;

    fn player(&self, id: PlayerId) -> Player;

    fn field(&self) -> Field;

    /// Everything observable, read at one instant.
    fn snapshot(&self) -> DuelSnapshot;

    /// Queue a command for the engine thread.
    ///
    /// Fire and forget: the engine applies or refuses it on its own terms.
    fn enqueue_command(&self, command: Command);

    /// Stop the engine thread. Calling it twice is harmless.
    fn stop(&mut self);
}
