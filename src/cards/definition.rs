//! Imprints - immutable card and hero templates.
//!
//! An `Imprint` holds the base values of a card type ("Squire has 1 attack,
//! 2 life and costs 1"). Runtime values live on `CardInstance`, which starts
//! from the imprint and may diverge during the duel.
//!
//! Both types deserialize from the content directory's JSON files:
//!
//! ```
//! use duel_console::cards::Imprint;
//!
//! let squire: Imprint = serde_json::from_str(
//!     r#"{ "CardId": "Squire", "Attack": 1, "Armor": 0, "Life": 2, "Cost": 1 }"#,
//! ).unwrap();
//! assert_eq!(squire.life, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Base values of a card type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Imprint {
    /// Content identifier (file stem in `cards/`).
    pub card_id: String,
    pub attack: i64,
    pub armor: i64,
    pub life: i64,
    /// Resource units needed to play the card.
    #[serde(default)]
    pub cost: u32,
}

impl Imprint {
    /// Create a new imprint.
    #[must_use]
    pub fn new(card_id: impl Into<String>, attack: i64, armor: i64, life: i64, cost: u32) -> Self {
        Self {
            card_id: card_id.into(),
            attack,
            armor,
            life,
            cost,
        }
    }
}

/// Base values of a hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeroImprint {
    /// Content identifier (file stem in `heroes/`).
    pub hero_id: String,
    /// Starting and maximum life.
    pub life: i64,
}

impl HeroImprint {
    /// Create a new hero imprint.
    #[must_use]
    pub fn new(hero_id: impl Into<String>, life: i64) -> Self {
        Self {
            hero_id: hero_id.into(),
            life,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imprint_cost_defaults_to_zero() {
        let imprint: Imprint = serde_json::from_str(
            r#"{ "CardId": "Wall", "Attack": 0, "Armor": 3, "Life": 5 }"#,
        )
        .unwrap();
        assert_eq!(imprint, Imprint::new("Wall", 0, 3, 5, 0));
    }

    #[test]
    fn test_hero_from_json() {
        let hero: HeroImprint =
            serde_json::from_str(r#"{ "HeroId": "Knight", "Life": 25 }"#).unwrap();
        assert_eq!(hero, HeroImprint::new("Knight", 25));
    }

    #[test]
    fn test_imprint_missing_stat_is_error() {
        let parsed: Result<Imprint, _> =
            serde_json::from_str(r#"{ "CardId": "Broken", "Attack": 1 }"#);
        assert!(parsed.is_err());
    }
}
