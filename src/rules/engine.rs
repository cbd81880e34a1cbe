//! Rules engine trait for duel implementations.
//!
//! Rule sets implement `RulesEngine` to define:
//! - How a duel opens
//! - How each queued command modifies state, or why it is refused
//! - Win/loss conditions
//!
//! The threaded flow calls these from the engine thread only, with the state
//! write lock held.

use thiserror::Error;

use crate::command::{Command, CommandName};
use crate::core::config::DuelSettings;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::core::resources::InsufficientResources;
use crate::core::state::DuelState;
use crate::zones::PlacementError;

/// Result of a completed duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuelResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl DuelResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            DuelResult::Winner(p) => *p == player,
            DuelResult::Draw => false,
        }
    }
}

/// Engine-side refusal of a well-formed command.
///
/// The console never sees these; the engine logs them and moves on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{player} acted during {owner}'s turn")]
    NotYourTurn { player: PlayerId, owner: PlayerId },

    #[error("command `{0}` is not enabled for this duel")]
    CommandDisabled(CommandName),

    #[error("`{0}` is missing an argument")]
    MissingArgument(CommandName),

    #[error("already at the maximum level")]
    MaxLevel,

    #[error("level up needs {needed} exp, have {available}")]
    NotEnoughExp { needed: u32, available: u32 },

    #[error("card {0} is not in hand")]
    CardNotInHand(EntityId),

    #[error("grave is empty")]
    GraveEmpty,

    #[error("slot {slot} is not in {player}'s row")]
    NotYourRow { slot: usize, player: PlayerId },

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Resources(#[from] InsufficientResources),
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `start_duel`: Called once on the engine thread before any command
/// - `apply_command`: Must leave `state` untouched when it returns `Err`
/// - `is_terminal`: Return `None` while the duel continues
pub trait RulesEngine {
    /// Tuning values in effect.
    fn settings(&self) -> &DuelSettings;

    /// Prepare the opening turn.
    fn start_duel(&mut self, state: &mut DuelState);

    /// Apply one command.
    fn apply_command(&mut self, state: &mut DuelState, command: &Command)
        -> Result<(), RuleViolation>;

    /// Check if the duel is over.
    fn is_terminal(&self, state: &DuelState) -> Option<DuelResult>;
}
