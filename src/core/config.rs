//! Duel configuration.
//!
//! `DuelSettings` tunes the reference rules. Every key is optional in the
//! scenario file's `"Settings"` object; missing keys keep their defaults.
//!
//! Level thresholds are fixed: reaching level 2 costs 6 experience, level 3
//! costs 12 more, and level 3 is the cap.

use serde::{Deserialize, Serialize};

/// Experience needed to go from level 1 to level 2.
pub const LEVEL_2_EXP: u32 = 6;

/// Experience needed to go from level 2 to level 3.
pub const LEVEL_3_EXP: u32 = 12;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 3;

/// Experience required at `level` to reach the next level.
///
/// Returns `None` at the level cap.
///
/// ```
/// use duel_console::core::config::exp_to_next_level;
///
/// assert_eq!(exp_to_next_level(1), Some(6));
/// assert_eq!(exp_to_next_level(2), Some(12));
/// assert_eq!(exp_to_next_level(3), None);
/// ```
#[must_use]
pub const fn exp_to_next_level(level: u32) -> Option<u32> {
    match level {
        1 => Some(LEVEL_2_EXP),
        2 => Some(LEVEL_3_EXP),
        _ => None,
    }
}

/// Rule tuning for a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DuelSettings {
    /// Number of field slots, split evenly between the two players.
    pub field_size: usize,

    /// Action points granted at the start of each turn.
    pub action_points: u32,

    /// Experience gained by discarding a card.
    pub discard_exp: u32,

    /// Experience gained by the new turn owner at each turn change.
    pub turn_exp: u32,

    /// Max life (and life) gained per level up.
    pub level_life_bonus: i64,

    /// Units added to every resource counter by `charge`.
    pub charge_amount: u32,
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            field_size: 10,
            action_points: 2,
            discard_exp: 2,
            turn_exp: 1,
            level_life_bonus: 5,
            charge_amount: 1,
        }
    }
}

impl DuelSettings {
    /// Number of slots in one player's row.
    #[must_use]
    pub fn row_width(&self) -> usize {
        self.field_size / 2
    }

    /// Set the field size.
    #[must_use]
    pub fn with_field_size(mut self, size: usize) -> Self {
        self.field_size = size;
        self
    }

    /// Set the action points per turn.
    #[must_use]
    pub fn with_action_points(mut self, points: u32) -> Self {
        self.action_points = points;
        self
    }
}
