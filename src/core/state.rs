//! Duel state and read-only snapshots.
//!
//! ## DuelState
//!
//! The live session: ongoing flag, current turn, both players and the field.
//! Owned by the engine thread behind a lock; nothing else mutates it.
//!
//! ## DuelSnapshot
//!
//! A copy of the observable parts of `DuelState`, taken under a single read
//! lock. Hands, graves and field slots are persistent `im` vectors, so taking
//! a snapshot is O(1) regardless of collection sizes. The console renders and
//! validates against snapshots only.

use std::sync::Arc;

use super::entity::EntityId;
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{CardInstance, Imprint};
use crate::rules::DuelResult;
use crate::zones::Field;

/// Whose turn it is and how much they may still do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnData {
    /// Player allowed to act.
    pub owner: PlayerId,
    /// Actions remaining this turn.
    pub action_points: u32,
    /// Turn counter, starting at 1.
    pub number: u32,
}

impl TurnData {
    /// First turn for `owner`.
    #[must_use]
    pub fn first(owner: PlayerId, action_points: u32) -> Self {
        Self {
            owner,
            action_points,
            number: 1,
        }
    }
}

/// Live duel state, mutated only by the engine thread.
#[derive(Debug)]
pub struct DuelState {
    /// True from engine start until the duel ends or is stopped.
    pub ongoing: bool,

    /// Current turn.
    pub turn: TurnData,

    /// Both duelists.
    pub players: PlayerMap<Player>,

    /// Shared play area.
    pub field: Field,

    /// Outcome, once decided.
    pub result: Option<DuelResult>,

    /// Next entity ID to allocate.
    next_entity_id: u32,
}

impl DuelState {
    /// Create a not-yet-started duel.
    #[must_use]
    pub fn new(players: PlayerMap<Player>, field_size: usize, first: PlayerId) -> Self {
        let player_count = players.player_count();
        Self {
            ongoing: false,
            turn: TurnData::first(first, 0),
            players,
            field: Field::new(field_size),
            result: None,
            next_entity_id: EntityId::first_non_player(player_count),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Create a card instance from `imprint` and put it in `owner`'s hand.
    pub fn create_card_in_hand(&mut self, owner: PlayerId, imprint: Arc<Imprint>) -> EntityId {
        let entity_id = self.alloc_entity();
        let card = CardInstance::new(entity_id, imprint, owner);
        self.players[owner].add_to_hand(card);
        entity_id
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn turn_owner(&self) -> PlayerId {
        self.turn.owner
    }

    /// The seat after `of`, wrapping around.
    #[must_use]
    pub fn opposing_player(&self, of: PlayerId) -> PlayerId {
        opposing(of, self.player_count())
    }

    /// Mark the duel as over.
    pub fn finish(&mut self, result: Option<DuelResult>) {
        self.ongoing = false;
        self.result = result;
    }

    /// Copy the observable state.
    #[must_use]
    pub fn snapshot(&self) -> DuelSnapshot {
        DuelSnapshot {
            ongoing: self.ongoing,
            turn: self.turn,
            players: self.players.clone(),
            field: self.field.clone(),
            result: self.result.clone(),
        }
    }
}

fn opposing(of: PlayerId, player_count: usize) -> PlayerId {
    PlayerId::new(((of.index() + 1) % player_count) as u8)
}

/// Read-only copy of a duel at one instant.
#[derive(Clone, Debug)]
pub struct DuelSnapshot {
    pub ongoing: bool,
    pub turn: TurnData,
    pub players: PlayerMap<Player>,
    pub field: Field,
    pub result: Option<DuelResult>,
}

impl DuelSnapshot {
    /// Player whose turn it is.
    #[must_use]
    pub fn turn_owner(&self) -> &Player {
        &self.players[self.turn.owner]
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// The seat after `of`, wrapping around.
    #[must_use]
    pub fn opposing_player(&self, of: PlayerId) -> PlayerId {
        opposing(of, self.players.player_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HeroImprint;
    use crate::core::ResourcePool;

    fn two_players() -> PlayerMap<Player> {
        let hero = HeroImprint::new("Knight", 20);
        PlayerMap::new(2, |id| {
            Player::new(id, format!("user{}", id.index()), &hero, ResourcePool::default())
        })
    }

    #[test]
    fn test_new_state_is_not_ongoing() {
        let state = DuelState::new(two_players(), 10, PlayerId::new(1));
        assert!(!state.ongoing);
        assert_eq!(state.turn_owner(), PlayerId::new(1));
        assert_eq!(state.turn.number, 1);
        assert_eq!(state.field.len(), 10);
    }

    #[test]
    fn test_alloc_entity_starts_after_players() {
        let mut state = DuelState::new(two_players(), 10, PlayerId::new(0));
        assert_eq!(state.alloc_entity(), EntityId(2));
        assert_eq!(state.alloc_entity(), EntityId(3));
    }

    #[test]
    fn test_create_card_in_hand() {
        let mut state = DuelState::new(two_players(), 10, PlayerId::new(0));
        let imprint = Arc::new(Imprint::new("Squire", 1, 0, 2, 1));

        let id = state.create_card_in_hand(PlayerId::new(1), imprint);

        let hand = &state.players[PlayerId::new(1)].hand;
        assert_eq!(hand.len(), 1);
        assert_eq!(hand[0].entity_id, id);
        assert_eq!(hand[0].owner, PlayerId::new(1));
    }

    #[test]
    fn test_opposing_player_wraps() {
        let state = DuelState::new(two_players(), 10, PlayerId::new(0));
        assert_eq!(state.opposing_player(PlayerId::new(0)), PlayerId::new(1));
        assert_eq!(state.opposing_player(PlayerId::new(1)), PlayerId::new(0));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = DuelState::new(two_players(), 10, PlayerId::new(0));
        state.ongoing = true;
        let snapshot = state.snapshot();

        state.create_card_in_hand(PlayerId::new(0), Arc::new(Imprint::new("Squire", 1, 0, 2, 1)));
        state.finish(Some(DuelResult::Winner(PlayerId::new(0))));

        assert!(snapshot.ongoing);
        assert!(snapshot.turn_owner().hand.is_empty());
        assert!(snapshot.result.is_none());
        assert_eq!(snapshot.opposing_player(PlayerId::new(0)), PlayerId::new(1));
    }
}
