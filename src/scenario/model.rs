//! Scenario file model.
//!
//! A scenario is a JSON document with PascalCase keys:
//!
//! ```json
//! {
//!   "RandomSeed": 7,
//!   "ContentDirectory": "content",
//!   "LoadCommands": ["level-up", "discard", "revive", "play-card", "charge"],
//!   "GoesFirst": "Random",
//!   "Player1": { "ID": "alice", "Hero": "Knight", "Mana": ["Fire"], "Cards": ["Squire"] },
//!   "Player2": { "ID": "bob", "Hero": "Knight", "Mana": ["Water"], "Cards": ["Wall"] },
//!   "Settings": { "ActionPoints": 3 }
//! }
//! ```
//!
//! `RandomSeed` may be `null` for an entropy seed. Without `LoadCommands`
//! every command is enabled. `Settings` overrides any subset of the
//! defaults. Unknown keys are ignored.

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::config::DuelSettings;

/// Who takes the first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum GoesFirst {
    #[default]
    Player1,
    Player2,
    Random,
}

/// One duelist's starting setup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerSpec {
    /// User id shown on screen.
    #[serde(rename = "ID")]
    pub id: String,

    /// Hero content id.
    pub hero: String,

    /// Resource counter names, in spending order.
    #[serde(default)]
    pub mana: Vec<String>,

    /// Card content ids for the starting hand.
    #[serde(default)]
    pub cards: Vec<String>,
}

/// Parsed scenario file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Scenario {
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Content root, relative to the scenario file.
    pub content_directory: PathBuf,

    /// Canonical names of the commands the duel accepts.
    #[serde(default)]
    pub load_commands: Option<Vec<String>>,

    #[serde(default)]
    pub goes_first: GoesFirst,

    pub player1: PlayerSpec,
    pub player2: PlayerSpec,

    #[serde(default)]
    pub settings: DuelSettings,
}

impl Scenario {
    /// Parse a scenario document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Both player specs in seat order.
    #[must_use]
    pub fn players(&self) -> [&PlayerSpec; 2] {
        [&self.player1, &self.player2]
    }
}
