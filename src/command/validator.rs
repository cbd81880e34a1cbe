//! Input validation: one console line in, one directive or rejection out.
//!
//! Validation happens in two phases:
//!
//! 1. `validate` checks the verb, arity and numeric bounds against the sizes
//!    observed at validation time. It is pure and never touches the engine.
//! 2. `CommandRequest::resolve` maps the positional indices onto the
//!    collections read immediately before the enqueue, producing a `Command`
//!    that names cards by `EntityId`.
//!
//! Positional indices are only meaningful for the frame that displayed them,
//! so a `CommandRequest` must never be kept across loop iterations.
//!
//! ## Check order
//!
//! For verbs with arguments: arity, empty hand, card number parse, too high,
//! negative, then (play only) position parse and position range. A
//! non-numeric argument yields the same usage message as a missing one.

use im::Vector;
use thiserror::Error;

use super::action::{Command, CommandArg, CommandName};
use crate::cards::CardInstance;
use crate::core::player::PlayerId;
use crate::core::state::DuelSnapshot;
use crate::zones::Field;

/// The verb list shown by `help` and after an unknown command.
pub const HELP_LINE: &str =
    "Commands: [charge, play, level(up), disc(ard), rev(ive), hand, grave, end, help]";

/// Recognized first tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    LevelUp,
    Discard,
    Hand,
    Grave,
    Revive,
    Play,
    Charge,
    End,
    Help,
}

impl Verb {
    /// Match a token case-insensitively.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let verb = match token.to_lowercase().as_str() {
            "level" | "levelup" => Verb::LevelUp,
            "disc" | "discard" => Verb::Discard,
            "hand" => Verb::Hand,
            "grave" => Verb::Grave,
            "revive" | "rev" => Verb::Revive,
            "play" => Verb::Play,
            "charge" => Verb::Charge,
            "end" => Verb::End,
            "help" => Verb::Help,
            _ => return None,
        };
        Some(verb)
    }
}

/// Collection sizes the line is checked against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObservedBounds {
    pub hand_size: usize,
    pub field_size: usize,
}

impl ObservedBounds {
    #[must_use]
    pub fn new(hand_size: usize, field_size: usize) -> Self {
        Self {
            hand_size,
            field_size,
        }
    }

    /// Bounds for the turn owner of `snapshot`.
    #[must_use]
    pub fn of(snapshot: &DuelSnapshot) -> Self {
        Self::new(snapshot.turn_owner().hand.len(), snapshot.field.len())
    }
}

/// What an accepted line asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Forward a command to the engine.
    Submit(CommandRequest),
    ShowHand,
    ShowGrave,
    Help,
    /// Stop the session.
    End,
}

/// An engine command whose arguments are still positional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandRequest {
    pub name: CommandName,
    pub hand_index: Option<usize>,
    pub slot: Option<usize>,
}

impl CommandRequest {
    #[must_use]
    pub fn bare(name: CommandName) -> Self {
        Self {
            name,
            hand_index: None,
            slot: None,
        }
    }

    /// Resolve positions against the current `hand` and `field`.
    ///
    /// Bounds are checked again here: the collections may have changed since
    /// the line was validated.
    pub fn resolve(
        &self,
        owner: PlayerId,
        hand: &Vector<CardInstance>,
        field: &Field,
    ) -> Result<Command, Rejection> {
        let mut command = Command::new(self.name, owner);

        if let Some(index) = self.hand_index {
            let card = hand.get(index).ok_or(if hand.is_empty() {
                Rejection::EmptyHand
            } else {
                Rejection::CardNumberTooHigh
            })?;
            command.push_arg(CommandArg::HandCard(card.entity_id));
        }

        if let Some(slot) = self.slot {
            if slot >= field.len() {
                return Err(Rejection::PositionOutOfRange {
                    field_size: field.len(),
                });
            }
            command.push_arg(CommandArg::FieldSlot(slot));
        }

        Ok(command)
    }
}

/// Why a line was not accepted. `Display` is the text shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Your hand is empty.")]
    EmptyHand,

    #[error("Card number provided is too high.")]
    CardNumberTooHigh,

    #[error("Card number cannot be negative.")]
    NegativeCardNumber,

    #[error("Position must be a spot on the field. MaxPos: {field_size}")]
    PositionOutOfRange { field_size: usize },

    /// `verb` is the spelling the player typed (`disc` or `discard`).
    #[error("Please provide a card number. example: {verb} 2")]
    DiscardUsage { verb: String },

    #[error(
        "Please provide a card number and a position. example: play 2 4\nThis would place card 2 in position 4."
    )]
    PlayUsage,

    #[error("{line} is not a valid command.")]
    UnknownCommand { line: String },
}

impl Rejection {
    /// Whether the verb list should follow the message.
    #[must_use]
    pub fn shows_help(&self) -> bool {
        matches!(self, Rejection::UnknownCommand { .. })
    }
}

/// Validate one input line against `bounds`.
///
/// ```
/// use duel_console::command::{validate, Directive, ObservedBounds, Rejection};
///
/// let bounds = ObservedBounds::new(3, 10);
/// assert!(matches!(validate("disc 2", bounds), Ok(Directive::Submit(_))));
/// assert_eq!(validate("disc 3", bounds), Err(Rejection::CardNumberTooHigh));
/// ```
pub fn validate(line: &str, bounds: ObservedBounds) -> Result<Directive, Rejection> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let unknown = || Rejection::UnknownCommand {
        line: line.trim().to_string(),
    };

    let first = tokens.first().ok_or_else(unknown)?;
    let verb = Verb::parse(first).ok_or_else(unknown)?;

    let directive = match verb {
        Verb::LevelUp => Directive::Submit(CommandRequest::bare(CommandName::LevelUp)),
        Verb::Revive => Directive::Submit(CommandRequest::bare(CommandName::Revive)),
        Verb::Charge => Directive::Submit(CommandRequest::bare(CommandName::Charge)),
        Verb::Hand => Directive::ShowHand,
        Verb::Grave => Directive::ShowGrave,
        Verb::Help => Directive::Help,
        Verb::End => Directive::End,
        Verb::Discard => {
            let usage = || Rejection::DiscardUsage {
                verb: first.to_lowercase(),
            };
            if tokens.len() != 2 {
                return Err(usage());
            }
            let index = card_number(tokens[1], bounds.hand_size, usage)?;
            Directive::Submit(CommandRequest {
                name: CommandName::Discard,
                hand_index: Some(index),
                slot: None,
            })
        }
        Verb::Play => {
            let usage = || Rejection::PlayUsage;
            if tokens.len() != 3 {
                return Err(usage());
            }
            let index = card_number(tokens[1], bounds.hand_size, usage)?;
            let position: i64 = tokens[2].parse().map_err(|_| usage())?;
            let slot = usize::try_from(position)
                .ok()
                .filter(|&p| p < bounds.field_size)
                .ok_or(Rejection::PositionOutOfRange {
                    field_size: bounds.field_size,
                })?;
            Directive::Submit(CommandRequest {
                name: CommandName::PlayCard,
                hand_index: Some(index),
                slot: Some(slot),
            })
        }
    };

    Ok(directive)
}

fn card_number(
    token: &str,
    hand_size: usize,
    usage: impl Fn() -> Rejection,
) -> Result<usize, Rejection> {
    if hand_size == 0 {
        return Err(Rejection::EmptyHand);
    }
    let number: i64 = token.parse().map_err(|_| usage())?;
    if number >= 0 && number as u64 >= hand_size as u64 {
        return Err(Rejection::CardNumberTooHigh);
    }
    usize::try_from(number).map_err(|_| Rejection::NegativeCardNumber)
}
