//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical card during a duel. It shares its imprint
//! through an `Arc` and carries its own runtime stats plus a free-form value
//! store, the same way instance state is kept apart from definitions.
//!
//! An instance's position in a hand, grave or field changes as cards move;
//! its `entity_id` does not.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::definition::Imprint;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// A card in play or held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Template this instance was created from.
    pub imprint: Arc<Imprint>,

    /// Player who owns the card (and whose grave it returns to).
    pub owner: PlayerId,

    /// Runtime stats, initialized from the imprint.
    pub attack: i64,
    pub armor: i64,
    pub life: i64,
    pub max_life: i64,
    pub cost: u32,

    /// Mutable instance values (counters, markers, etc.)
    pub values: FxHashMap<String, i64>,
}

impl CardInstance {
    /// Create an instance with stats copied from its imprint.
    #[must_use]
    pub fn new(entity_id: EntityId, imprint: Arc<Imprint>, owner: PlayerId) -> Self {
        Self {
            entity_id,
            attack: imprint.attack,
            armor: imprint.armor,
            life: imprint.life,
            max_life: imprint.life,
            cost: imprint.cost,
            imprint,
            owner,
            values: FxHashMap::default(),
        }
    }

    /// Content id of the imprint.
    #[must_use]
    pub fn card_id(&self) -> &str {
        &self.imprint.card_id
    }

    /// Get a value with a default.
    #[must_use]
    pub fn get_value(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    /// Set a value.
    pub fn set_value(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), value);
    }

    /// Values sorted by key, for stable display.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<(&str, i64)> {
        let mut entries: Vec<_> = self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }

    /// Apply combat damage reduced by armor. Returns the damage dealt.
    pub fn take_hit(&mut self, attack: i64) -> i64 {
        let damage = (attack - self.armor).max(0);
        self.life -= damage;
        damage
    }

    /// Whether the instance has no life left.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.life <= 0
    }

    /// Restore runtime stats to the imprint's and clear values.
    ///
    /// Used when a card leaves the field.
    pub fn reset(&mut self) {
        self.attack = self.imprint.attack;
        self.armor = self.imprint.armor;
        self.life = self.imprint.life;
        self.max_life = self.imprint.life;
        self.cost = self.imprint.cost;
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squire() -> CardInstance {
        let imprint = Arc::new(Imprint::new("Squire", 2, 1, 3, 1));
        CardInstance::new(EntityId(10), imprint, PlayerId::new(0))
    }

    #[test]
    fn test_card_instance_new() {
        let card = squire();

        assert_eq!(card.entity_id, EntityId(10));
        assert_eq!(card.card_id(), "Squire");
        assert_eq!(card.attack, 2);
        assert_eq!(card.life, 3);
        assert_eq!(card.max_life, 3);
        assert_eq!(card.cost, 1);
    }

    #[test]
    fn test_values() {
        let mut card = squire();
        assert_eq!(card.get_value("shield", 0), 0);

        card.set_value("shield", 2);
        card.set_value("burn", 1);
        assert_eq!(card.get_value("shield", 0), 2);
        assert_eq!(card.sorted_values(), vec![("burn", 1), ("shield", 2)]);
    }

    #[test]
    fn test_take_hit_respects_armor() {
        let mut card = squire();

        assert_eq!(card.take_hit(1), 0);
        assert_eq!(card.life, 3);

        assert_eq!(card.take_hit(4), 3);
        assert!(card.is_destroyed());
    }

    #[test]
    fn test_reset() {
        let mut card = squire();
        card.take_hit(3);
        card.set_value("burn", 1);

        card.reset();
        assert_eq!(card.life, 3);
        assert!(card.values.is_empty());
    }
}
