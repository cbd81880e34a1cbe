//! Entity identification.
//!
//! Every targetable object in a duel (player or card instance) has a unique
//! `EntityId`. Unlike positional indices into a hand, grave or field, an
//! entity id never changes while the duel runs, which is why commands carry
//! entity ids rather than positions.
//!
//! ## ID Layout
//!
//! - `0..player_count`: Reserved for players
//! - `player_count..`: Card instances, allocated in creation order
//!
//! ```
//! use duel_console::core::EntityId;
//!
//! let player = EntityId::player_id(1);
//! assert!(player.is_player(2));
//!
//! let card = EntityId(EntityId::first_non_player(2));
//! assert!(!card.is_player(2));
//! ```

/// Unique identifier for any duel entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID for a player by index.
    #[must_use]
    pub const fn player_id(index: u8) -> Self {
        Self(index as u32)
    }

    /// Get the first entity ID available for card instances.
    #[must_use]
    pub const fn first_non_player(player_count: usize) -> u32 {
        player_count as u32
    }

    /// Check if this entity ID refers to a player.
    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        self.0 < player_count as u32
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create the entity ID of a player.
    #[must_use]
    pub const fn player(id: super::PlayerId) -> Self {
        Self(id.0 as u32)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@[{}]", self.0)
    }
}
