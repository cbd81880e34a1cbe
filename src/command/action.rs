//! Canonical commands: name + owner + resolved arguments.
//!
//! A `Command` is what the engine's queue carries. Its name is one of the
//! fixed `CommandName`s and its arguments point at things by stable identity:
//! - "charge" = name only, no arguments
//! - "discard card X" = name + 1 argument (the card)
//! - "play card X into slot 4" = name + 2 arguments
//!
//! Positional hand indices never appear here. They are resolved to
//! `EntityId`s right before the command is enqueued.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// Engine-facing command names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommandName {
    #[serde(rename = "level-up")]
    LevelUp,
    #[serde(rename = "discard")]
    Discard,
    #[serde(rename = "revive")]
    Revive,
    #[serde(rename = "play-card")]
    PlayCard,
    #[serde(rename = "charge")]
    Charge,
}

impl CommandName {
    /// Every command, in declaration order.
    pub const ALL: [CommandName; 5] = [
        CommandName::LevelUp,
        CommandName::Discard,
        CommandName::Revive,
        CommandName::PlayCard,
        CommandName::Charge,
    ];

    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandName::LevelUp => "level-up",
            CommandName::Discard => "discard",
            CommandName::Revive => "revive",
            CommandName::PlayCard => "play-card",
            CommandName::Charge => "charge",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not a canonical command name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown command name `{0}`")]
pub struct UnknownCommandName(pub String);

impl FromStr for CommandName {
    type Err = UnknownCommandName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownCommandName(s.to_string()))
    }
}

/// A resolved command argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandArg {
    /// A card in the owner's hand, by identity.
    HandCard(EntityId),
    /// A field slot, by its stable index.
    FieldSlot(usize),
}

/// A complete command ready for the engine's queue.
///
/// ## Example
///
/// ```
/// use duel_console::command::{Command, CommandArg, CommandName};
/// use duel_console::core::{EntityId, PlayerId};
///
/// let charge = Command::new(CommandName::Charge, PlayerId::new(0));
/// assert!(charge.args.is_empty());
///
/// let play = Command::with_args(
///     CommandName::PlayCard,
///     PlayerId::new(1),
///     &[CommandArg::HandCard(EntityId(7)), CommandArg::FieldSlot(6)],
/// );
/// assert_eq!(play.hand_card(), Some(EntityId(7)));
/// assert_eq!(play.field_slot(), Some(6));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    pub name: CommandName,

    /// Player on whose behalf the command is issued.
    pub owner: PlayerId,

    /// At most a card and a slot, so no heap allocation.
    pub args: SmallVec<[CommandArg; 2]>,
}

impl Command {
    /// Create a command with no arguments.
    #[must_use]
    pub fn new(name: CommandName, owner: PlayerId) -> Self {
        Self {
            name,
            owner,
            args: SmallVec::new(),
        }
    }

    /// Create a command with the given arguments.
    #[must_use]
    pub fn with_args(name: CommandName, owner: PlayerId, args: &[CommandArg]) -> Self {
        Self {
            name,
            owner,
            args: SmallVec::from_slice(args),
        }
    }

    /// Add an argument.
    pub fn push_arg(&mut self, arg: CommandArg) {
        self.args.push(arg);
    }

    /// First hand-card argument.
    #[must_use]
    pub fn hand_card(&self) -> Option<EntityId> {
        self.args.iter().find_map(|arg| match arg {
            CommandArg::HandCard(id) => Some(*id),
            CommandArg::FieldSlot(_) => None,
        })
    }

    /// First field-slot argument.
    #[must_use]
    pub fn field_slot(&self) -> Option<usize> {
        self.args.iter().find_map(|arg| match arg {
            CommandArg::FieldSlot(slot) => Some(*slot),
            CommandArg::HandCard(_) => None,
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.name, self.owner)?;
        for arg in &self.args {
            match arg {
                CommandArg::HandCard(id) => write!(f, " card {id}")?,
                CommandArg::FieldSlot(slot) => write!(f, " slot {slot}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name_round_trip() {
        for name in CommandName::ALL {
            assert_eq!(name.as_str().parse::<CommandName>(), Ok(name));
        }
        assert_eq!(
            "CMDLevelUp".parse::<CommandName>(),
            Err(UnknownCommandName("CMDLevelUp".to_string()))
        );
    }

    #[test]
    fn test_command_name_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&CommandName::PlayCard).unwrap();
        assert_eq!(json, "\"play-card\"");

        let names: Vec<CommandName> =
            serde_json::from_str(r#"["level-up", "charge"]"#).unwrap();
        assert_eq!(names, vec![CommandName::LevelUp, CommandName::Charge]);
    }

    #[test]
    fn test_command_no_args() {
        let command = Command::new(CommandName::LevelUp, PlayerId::new(0));

        assert!(command.args.is_empty());
        assert_eq!(command.hand_card(), None);
        assert_eq!(command.field_slot(), None);
    }

    #[test]
    fn test_command_push_arg() {
        let mut command = Command::new(CommandName::PlayCard, PlayerId::new(0));
        command.push_arg(CommandArg::HandCard(EntityId(4)));
        command.push_arg(CommandArg::FieldSlot(2));

        assert_eq!(command.args.len(), 2);
        assert_eq!(command.hand_card(), Some(EntityId(4)));
        assert_eq!(command.field_slot(), Some(2));
    }

    #[test]
    fn test_command_equality() {
        let a = Command::with_args(
            CommandName::Discard,
            PlayerId::new(0),
            &[CommandArg::HandCard(EntityId(5))],
        );
        let b = a.clone();
        let c = Command::with_args(
            CommandName::Discard,
            PlayerId::new(1),
            &[CommandArg::HandCard(EntityId(5))],
        );

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_command_display() {
        let command = Command::with_args(
            CommandName::PlayCard,
            PlayerId::new(1),
            &[CommandArg::HandCard(EntityId(9)), CommandArg::FieldSlot(6)],
        );
        assert_eq!(command.to_string(), "play-card by Player 2 card @[9] slot 6");
    }
}
