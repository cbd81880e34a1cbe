//! Player identification and per-player data.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Player indices are 0-based.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! One duelist: identity, life, level/experience, resource pool and the two
//! ordered card collections (hand and grave). Collections are persistent
//! `im` vectors so a snapshot of a player is an O(1) clone.

use im::Vector;
use rustc_hash::FxHashMap;
use std::ops::{Index, IndexMut};

use super::entity::EntityId;
use super::resources::ResourcePool;
use crate::cards::{CardInstance, HeroImprint};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a duel with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use duel_console::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::new(2, |_| 20);
/// life[PlayerId::new(1)] = 15;
/// assert_eq!(life[PlayerId::new(0)], 20);
/// assert_eq!(life[PlayerId::new(1)], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Build a PlayerMap from already constructed values, in player order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A duelist and everything they hold.
///
/// Only the engine thread mutates a `Player`; the console works on cloned
/// snapshots.
#[derive(Clone, Debug)]
pub struct Player {
    /// Seat in the duel.
    pub id: PlayerId,

    /// User identity from the scenario (display name).
    pub user_id: String,

    /// Hero this player duels with.
    pub hero: String,

    /// Current life.
    pub life: i64,

    /// Life cap.
    pub max_life: i64,

    /// Current level (starts at 1).
    pub level: u32,

    /// Experience gathered towards the next level.
    pub exp: u32,

    /// Named resource counters.
    pub resources: ResourcePool,

    /// Cards held, in draw order.
    pub hand: Vector<CardInstance>,

    /// Spent cards, oldest first.
    pub grave: Vector<CardInstance>,

    /// Free-form values scripts or rules attach to the player.
    pub values: FxHashMap<String, i64>,
}

impl Player {
    /// Create a player at full life for the given hero.
    #[must_use]
    pub fn new(
        id: PlayerId,
        user_id: impl Into<String>,
        hero: &HeroImprint,
        resources: ResourcePool,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            hero: hero.hero_id.clone(),
            life: hero.life,
            max_life: hero.life,
            level: 1,
            exp: 0,
            resources,
            hand: Vector::new(),
            grave: Vector::new(),
            values: FxHashMap::default(),
        }
    }

    /// Target id of the player itself.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        EntityId::player(self.id)
    }

    /// Add a card to the end of the hand.
    pub fn add_to_hand(&mut self, card: CardInstance) {
        self.hand.push_back(card);
    }

    /// Position of a card in the hand, if held.
    #[must_use]
    pub fn hand_position(&self, entity: EntityId) -> Option<usize> {
        self.hand.iter().position(|c| c.entity_id == entity)
    }

    /// Remove a card from the hand by entity id.
    pub fn take_from_hand(&mut self, entity: EntityId) -> Option<CardInstance> {
        let pos = self.hand_position(entity)?;
        Some(self.hand.remove(pos))
    }

    /// Put a card on top of the grave.
    pub fn send_to_grave(&mut self, card: CardInstance) {
        self.grave.push_back(card);
    }

    /// Take the most recently spent card from the grave.
    pub fn take_from_grave(&mut self) -> Option<CardInstance> {
        self.grave.pop_back()
    }

    /// Reduce life, never going below zero.
    pub fn take_damage(&mut self, amount: i64) {
        self.life = (self.life - amount.max(0)).max(0);
    }

    /// Whether this player has lost.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.life <= 0
    }
}
