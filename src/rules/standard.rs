//! The standard duel rule set.
//!
//! ## Turn structure
//!
//! The turn owner spends one action point per accepted command. When the
//! points run out the turn changes: every creature in the outgoing owner's
//! row strikes the slot facing it. A facing creature absorbs the hit (minus
//! its armor) and is sent to its owner's grave once out of life; an empty
//! facing slot lets the hit through to the opposing player. The new owner
//! then gains turn exp and a full set of action points.
//!
//! ## Commands
//!
//! | command | effect |
//! |---|---|
//! | `level-up` | spend the exp for the next level, raise life and max life |
//! | `discard` | hand to grave, gain discard exp |
//! | `revive` | most recent grave card back to hand |
//! | `charge` | every resource counter gains the charge amount |
//! | `play-card` | pay the card's cost, move it into an empty slot of the owner's row |

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::engine::{DuelResult, RuleViolation, RulesEngine};
use crate::command::{Command, CommandName};
use crate::core::config::{exp_to_next_level, DuelSettings};
use crate::core::player::PlayerId;
use crate::core::state::DuelState;
use crate::zones::PlacementError;

/// Standard rules with a configurable set of enabled commands.
#[derive(Clone, Debug)]
pub struct StandardRules {
    settings: DuelSettings,
    enabled: FxHashSet<CommandName>,
}

impl StandardRules {
    /// Rules with every command enabled.
    #[must_use]
    pub fn new(settings: DuelSettings) -> Self {
        Self {
            settings,
            enabled: CommandName::ALL.into_iter().collect(),
        }
    }

    /// Restrict the duel to `commands`.
    #[must_use]
    pub fn with_enabled_commands(mut self, commands: impl IntoIterator<Item = CommandName>) -> Self {
        self.enabled = commands.into_iter().collect();
        self
    }

    /// Check if a command is enabled.
    #[must_use]
    pub fn is_enabled(&self, name: CommandName) -> bool {
        self.enabled.contains(&name)
    }

    fn level_up(&self, state: &mut DuelState, owner: PlayerId) -> Result<(), RuleViolation> {
        let player = &mut state.players[owner];
        let needed = exp_to_next_level(player.level).ok_or(RuleViolation::MaxLevel)?;
        if player.exp < needed {
            return Err(RuleViolation::NotEnoughExp {
                needed,
                available: player.exp,
            });
        }
        player.exp -= needed;
        player.level += 1;
        player.max_life += self.settings.level_life_bonus;
        player.life += self.settings.level_life_bonus;
        info!(player = %owner, level = player.level, "level up");
        Ok(())
    }

    fn discard(&self, state: &mut DuelState, command: &Command) -> Result<(), RuleViolation> {
        let card_id = command
            .hand_card()
            .ok_or(RuleViolation::MissingArgument(command.name))?;
        let player = &mut state.players[command.owner];
        let card = player
            .take_from_hand(card_id)
            .ok_or(RuleViolation::CardNotInHand(card_id))?;
        player.send_to_grave(card);
        player.exp += self.settings.discard_exp;
        Ok(())
    }

    fn revive(state: &mut DuelState, owner: PlayerId) -> Result<(), RuleViolation> {
        let player = &mut state.players[owner];
        let card = player.take_from_grave().ok_or(RuleViolation::GraveEmpty)?;
        player.add_to_hand(card);
        Ok(())
    }

    fn play_card(state: &mut DuelState, command: &Command) -> Result<(), RuleViolation> {
        let missing = RuleViolation::MissingArgument(command.name);
        let card_id = command.hand_card().ok_or_else(|| missing.clone())?;
        let slot = command.field_slot().ok_or(missing)?;
        let owner = command.owner;

        if state.field.row_owner(slot) != Some(owner) {
            return Err(RuleViolation::NotYourRow {
                slot,
                player: owner,
            });
        }
        if state.field.occupant(slot).is_some() {
            return Err(PlacementError::Occupied(slot).into());
        }

        let player = &mut state.players[owner];
        let position = player
            .hand_position(card_id)
            .ok_or(RuleViolation::CardNotInHand(card_id))?;
        let cost = player.hand[position].cost;
        player.resources.spend(cost)?;

        let card = player.hand.remove(position);
        state.field.place(slot, card)?;
        Ok(())
    }

    /// Resolve combat for the outgoing owner and hand the turn over.
    fn change_turn(&self, state: &mut DuelState) {
        let outgoing = state.turn.owner;
        let incoming = state.opposing_player(outgoing);

        for slot in state.field.row(outgoing) {
            let Some(attack) = state.field.occupant(slot).map(|c| c.attack) else {
                continue;
            };
            let Some(target) = state.field.facing(slot) else {
                continue;
            };

            match state.field.occupant_mut(target) {
                Some(defender) => {
                    let damage = defender.take_hit(attack);
                    debug!(slot, target, damage, "creature strikes creature");
                    if defender.is_destroyed() {
                        if let Some(mut fallen) = state.field.take(target) {
                            fallen.reset();
                            let grave_owner = fallen.owner;
                            state.players[grave_owner].send_to_grave(fallen);
                        }
                    }
                }
                None => {
                    state.players[incoming].take_damage(attack);
                    debug!(slot, damage = attack, player = %incoming, "creature strikes player");
                }
            }
        }

        state.turn.owner = incoming;
        state.turn.action_points = self.settings.action_points;
        state.turn.number += 1;
        state.players[incoming].exp += self.settings.turn_exp;
        info!(turn = state.turn.number, owner = %incoming, "turn changed");
    }
}

impl RulesEngine for StandardRules {
    fn settings(&self) -> &DuelSettings {
        &self.settings
    }

    fn start_duel(&mut self, state: &mut DuelState) {
        state.turn.action_points = self.settings.action_points;
        info!(
            owner = %state.turn.owner,
            action_points = state.turn.action_points,
            "duel started"
        );
    }

    fn apply_command(
        &mut self,
        state: &mut DuelState,
        command: &Command,
    ) -> Result<(), RuleViolation> {
        if !self.is_enabled(command.name) {
            return Err(RuleViolation::CommandDisabled(command.name));
        }
        let owner = state.turn_owner();
        if command.owner != owner {
            return Err(RuleViolation::NotYourTurn {
                player: command.owner,
                owner,
            });
        }

        match command.name {
            CommandName::LevelUp => self.level_up(state, owner)?,
            CommandName::Discard => self.discard(state, command)?,
            CommandName::Revive => Self::revive(state, owner)?,
            CommandName::Charge => state.players[owner]
                .resources
                .charge(self.settings.charge_amount),
            CommandName::PlayCard => Self::play_card(state, command)?,
        }

        state.turn.action_points = state.turn.action_points.saturating_sub(1);
        if state.turn.action_points == 0 {
            self.change_turn(state);
        }
        Ok(())
    }

    fn is_terminal(&self, state: &DuelState) -> Option<DuelResult> {
        let alive: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|(_, p)| !p.is_defeated())
            .map(|(id, _)| id)
            .collect();

        match alive.len() {
            0 => Some(DuelResult::Draw),
            1 => Some(DuelResult::Winner(alive[0])),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{HeroImprint, Imprint};
    use crate::command::CommandArg;
    use crate::core::entity::EntityId;
    use crate::core::player::{Player, PlayerMap};
    use crate::core::resources::ResourcePool;
    use std::sync::Arc;

    const P1: PlayerId = PlayerId::new(0);
    const P2: PlayerId = PlayerId::new(1);

    fn setup(settings: DuelSettings) -> (StandardRules, DuelState) {
        let hero = HeroImprint::new("Knight", 20);
        let players = PlayerMap::new(2, |id| {
            Player::new(id, format!("user{}", id.index()), &hero, ResourcePool::new(["Fire"]))
        });
        let mut state = DuelState::new(players, settings.field_size, P1);
        let mut rules = StandardRules::new(settings);
        rules.start_duel(&mut state);
        (rules, state)
    }

    fn give(state: &mut DuelState, owner: PlayerId, attack: i64, cost: u32) -> EntityId {
        state.create_card_in_hand(owner, Arc::new(Imprint::new("Squire", attack, 0, 2, cost)))
    }

    fn play(owner: PlayerId, card: EntityId, slot: usize) -> Command {
        Command::with_args(
            CommandName::PlayCard,
            owner,
            &[CommandArg::HandCard(card), CommandArg::FieldSlot(slot)],
        )
    }

    #[test]
    fn test_start_duel_fills_action_points() {
        let (_, state) = setup(DuelSettings::default().with_action_points(3));
        assert_eq!(state.turn.action_points, 3);
        assert_eq!(state.turn.owner, P1);
    }

    #[test]
    fn test_only_turn_owner_may_act() {
        let (mut rules, mut state) = setup(DuelSettings::default());
        let result = rules.apply_command(&mut state, &Command::new(CommandName::Charge, P2));

        assert_eq!(
            result,
            Err(RuleViolation::NotYourTurn { player: P2, owner: P1 })
        );
        assert_eq!(state.turn.action_points, 2);
    }

    #[test]
    fn test_disabled_command_is_refused() {
        let (rules, mut state) = setup(DuelSettings::default());
        let mut rules = rules.with_enabled_commands([CommandName::Charge]);

        assert_eq!(
            rules.apply_command(&mut state, &Command::new(CommandName::Revive, P1)),
            Err(RuleViolation::CommandDisabled(CommandName::Revive))
        );
        assert!(rules
            .apply_command(&mut state, &Command::new(CommandName::Charge, P1))
            .is_ok());
    }

    #[test]
    fn test_charge_and_action_points() {
        let (mut rules, mut state) = setup(DuelSettings::default());
        rules
            .apply_command(&mut state, &Command::new(CommandName::Charge, P1))
            .unwrap();

        assert_eq!(state.players[P1].resources.count("Fire"), Some(1));
        assert_eq!(state.turn.action_points, 1);
        assert_eq!(state.turn.owner, P1);
    }

    #[test]
    fn test_turn_changes_when_points_run_out() {
        let (mut rules, mut state) = setup(DuelSettings::default());
        for _ in 0..2 {
            rules
                .apply_command(&mut state, &Command::new(CommandName::Charge, P1))
                .unwrap();
        }

        assert_eq!(state.turn.owner, P2);
        assert_eq!(state.turn.number, 2);
        assert_eq!(state.turn.action_points, 2);
        assert_eq!(state.players[P2].exp, 1);
    }

    #[test]
    fn test_discard_gains_exp() {
        let (mut rules, mut state) = setup(DuelSettings::default());
        let card = give(&mut state, P1, 1, 0);
        let discard =
            Command::with_args(CommandName::Discard, P1, &[CommandArg::HandCard(card)]);

        rules.apply_command(&mut state, &discard).unwrap();

        let player = &state.players[P1];
        assert!(player.hand.is_empty());
        assert_eq!(player.grave[0].entity_id, card);
        assert_eq!(player.exp, 2);

        assert_eq!(
            rules.apply_command(&mut state, &discard),
            Err(RuleViolation::CardNotInHand(card))
        );
    }

    #[test]
    fn test_revive_takes_latest_grave_card() {
        let (mut rules, mut state) = setup(DuelSettings::default().with_action_points(5));
        assert_eq!(
            rules.apply_command(&mut state, &Command::new(CommandName::Revive, P1)),
            Err(RuleViolation::GraveEmpty)
        );

        let first = give(&mut state, P1, 1, 0);
        let second = give(&mut state, P1, 1, 0);
        for card in [first, second] {
            let discard =
                Command::with_args(CommandName::Discard, P1, &[CommandArg::HandCard(card)]);
            rules.apply_command(&mut state, &discard).unwrap();
        }
        rules
            .apply_command(&mut state, &Command::new(CommandName::Revive, P1))
            .unwrap();

        let player = &state.players[P1];
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.hand[0].entity_id, second);
        assert_eq!(player.grave[0].entity_id, first);
    }

    #[test]
    fn test_level_up() {
        let (mut rules, mut state) = setup(DuelSettings::default().with_action_points(5));
        let level_up = Command::new(CommandName::LevelUp, P1);

        assert_eq!(
            rules.apply_command(&mut state, &level_up),
            Err(RuleViolation::NotEnoughExp { needed: 6, available: 0 })
        );

        state.players[P1].exp = 7;
        rules.apply_command(&mut state, &level_up).unwrap();
        let player = &state.players[P1];
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 1);
        assert_eq!(player.max_life, 25);
        assert_eq!(player.life, 25);

        state.players[P1].exp = 12;
        rules.apply_command(&mut state, &level_up).unwrap();
        assert_eq!(
            rules.apply_command(&mut state, &level_up),
            Err(RuleViolation::MaxLevel)
        );
    }

    #[test]
    fn test_play_card_pays_cost() {
        let (mut rules, mut state) = setup(DuelSettings::default().with_action_points(5));
        let card = give(&mut state, P1, 1, 1);

        assert_eq!(
            rules.apply_command(&mut state, &play(P1, card, 0)),
            Err(RuleViolation::Resources(
                crate::core::resources::InsufficientResources { needed: 1, available: 0 }
            ))
        );
        assert_eq!(state.players[P1].hand.len(), 1);

        rules
            .apply_command(&mut state, &Command::new(CommandName::Charge, P1))
            .unwrap();
        rules.apply_command(&mut state, &play(P1, card, 0)).unwrap();

        assert!(state.players[P1].hand.is_empty());
        assert_eq!(state.players[P1].resources.total(), 0);
        assert_eq!(state.field.occupant(0).map(|c| c.entity_id), Some(card));
    }

    #[test]
    fn test_play_card_slot_rules() {
        let (mut rules, mut state) = setup(DuelSettings::default().with_action_points(5));
        let first = give(&mut state, P1, 1, 0);
        let second = give(&mut state, P1, 1, 0);

        assert_eq!(
            rules.apply_command(&mut state, &play(P1, first, 5)),
            Err(RuleViolation::NotYourRow { slot: 5, player: P1 })
        );

        rules.apply_command(&mut state, &play(P1, first, 2)).unwrap();
        assert_eq!(
            rules.apply_command(&mut state, &play(P1, second, 2)),
            Err(RuleViolation::Placement(PlacementError::Occupied(2)))
        );
        assert_eq!(
            rules.apply_command(
                &mut state,
                &Command::with_args(CommandName::PlayCard, P1, &[CommandArg::HandCard(second)])
            ),
            Err(RuleViolation::MissingArgument(CommandName::PlayCard))
        );
    }

    #[test]
    fn test_turn_change_combat() {
        let (mut rules, mut state) = setup(DuelSettings::default().with_action_points(3));
        let striker = give(&mut state, P1, 3, 0);
        let unopposed = give(&mut state, P1, 4, 0);

        let defender = Arc::new(Imprint::new("Guard", 0, 1, 2, 0));
        let guard_id = state.alloc_entity();
        state
            .field
            .place(5, crate::cards::CardInstance::new(guard_id, defender, P2))
            .unwrap();

        rules.apply_command(&mut state, &play(P1, striker, 0)).unwrap();
        rules.apply_command(&mut state, &play(P1, unopposed, 1)).unwrap();
        rules
            .apply_command(&mut state, &Command::new(CommandName::Charge, P1))
            .unwrap();

        // Guard had 2 life and 1 armor against 3 attack.
        assert!(state.field.occupant(5).is_none());
        assert_eq!(state.players[P2].grave[0].entity_id, guard_id);
        assert_eq!(state.players[P2].grave[0].life, 2);
        assert_eq!(state.players[P2].life, 16);
        assert_eq!(state.turn.owner, P2);
    }

    #[test]
    fn test_is_terminal() {
        let (rules, mut state) = setup(DuelSettings::default());
        assert_eq!(rules.is_terminal(&state), None);

        state.players[P2].take_damage(20);
        assert_eq!(rules.is_terminal(&state), Some(DuelResult::Winner(P1)));

        state.players[P1].take_damage(20);
        assert_eq!(rules.is_terminal(&state), Some(DuelResult::Draw));
    }

    #[test]
    fn test_apply_logs_only_its_own_events() {
        use std::io;
        use std::sync::Mutex;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let (mut rules, mut state) = setup(DuelSettings::default());
        tracing::subscriber::with_default(subscriber, || {
            rules
                .apply_command(&mut state, &Command::new(CommandName::Charge, P1))
                .unwrap();
        });

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(!text.contains("command applied"), "{text}");
    }
}
