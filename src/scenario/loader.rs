//! Scenario bootstrap: scenario file in, ready-to-start duel out.

use std::fs;
use std::path::Path;

use tracing::info;

use super::content::ContentLoader;
use super::model::{GoesFirst, PlayerSpec, Scenario};
use super::BootstrapError;
use crate::cards::ContentRegistry;
use crate::command::CommandName;
use crate::core::config::DuelSettings;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::resources::ResourcePool;
use crate::core::rng::GameRng;
use crate::core::state::DuelState;
use crate::engine::DuelFlow;
use crate::rules::StandardRules;

/// Everything the engine needs besides the state itself.
#[derive(Clone, Debug)]
pub struct Environment {
    pub registry: ContentRegistry,
    /// Random source, already advanced past the first-player draw. Rule sets
    /// that need randomness continue from it so a seeded scenario replays
    /// exactly.
    pub rng: GameRng,
    pub settings: DuelSettings,
    pub enabled_commands: Vec<CommandName>,
}

/// A prepared duel that has not started yet.
#[derive(Debug)]
pub struct Bootstrap {
    pub environment: Environment,
    pub state: DuelState,
}

impl Bootstrap {
    /// Build the threaded flow running the standard rules.
    #[must_use]
    pub fn into_flow(self) -> DuelFlow<StandardRules> {
        let rules = StandardRules::new(self.environment.settings)
            .with_enabled_commands(self.environment.enabled_commands);
        DuelFlow::new(self.state, rules)
    }
}

/// Read the scenario at `path` and prepare a duel from it.
///
/// The content directory is resolved relative to the scenario file.
pub fn bootstrap(path: impl AsRef<Path>) -> Result<Bootstrap, BootstrapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| BootstrapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenario = Scenario::from_json(&text).map_err(|source| BootstrapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    bootstrap_scenario(&scenario, base)
}

/// Prepare a duel from an already parsed scenario.
pub fn bootstrap_scenario(scenario: &Scenario, base: &Path) -> Result<Bootstrap, BootstrapError> {
    let settings = scenario.settings.clone();
    if settings.field_size < 2 || settings.field_size % 2 != 0 {
        return Err(BootstrapError::InvalidFieldSize(settings.field_size));
    }

    let mut rng = scenario
        .random_seed
        .map_or_else(GameRng::from_entropy, GameRng::new);
    info!(seed = rng.seed(), "random source ready");

    let enabled_commands = match &scenario.load_commands {
        Some(names) => names
            .iter()
            .map(|name| name.parse::<CommandName>())
            .collect::<Result<Vec<_>, _>>()?,
        None => CommandName::ALL.to_vec(),
    };

    let mut loader = ContentLoader::new(base.join(&scenario.content_directory));
    let players = scenario
        .players()
        .into_iter()
        .enumerate()
        .map(|(seat, spec)| construct_player(PlayerId::new(seat as u8), spec, &mut loader))
        .collect::<Result<Vec<_>, _>>()?;

    let first = match scenario.goes_first {
        GoesFirst::Player1 => PlayerId::new(0),
        GoesFirst::Player2 => PlayerId::new(1),
        GoesFirst::Random => {
            if rng.gen_range_usize(0..2) == 0 {
                PlayerId::new(1)
            } else {
                PlayerId::new(0)
            }
        }
    };

    let mut state = DuelState::new(PlayerMap::from_vec(players), settings.field_size, first);
    for (seat, spec) in scenario.players().into_iter().enumerate() {
        let owner = PlayerId::new(seat as u8);
        for card_id in &spec.cards {
            let imprint = loader.load_card(card_id)?;
            state.create_card_in_hand(owner, imprint);
        }
    }

    info!(first = %first, commands = enabled_commands.len(), "scenario ready");
    Ok(Bootstrap {
        environment: Environment {
            registry: loader.into_registry(),
            rng,
            settings,
            enabled_commands,
        },
        state,
    })
}

fn construct_player(
    id: PlayerId,
    spec: &PlayerSpec,
    loader: &mut ContentLoader,
) -> Result<Player, BootstrapError> {
    let hero = loader.load_hero(&spec.hero)?;
    let pool = ResourcePool::new(spec.mana.iter().cloned());
    Ok(Player::new(id, spec.id.clone(), &hero, pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(json: &str) -> Scenario {
        Scenario::from_json(json).unwrap()
    }

    #[test]
    fn test_unknown_command_name() {
        let s = scenario(
            r#"{
                "ContentDirectory": "content",
                "LoadCommands": ["CMDLevelUp"],
                "Player1": { "ID": "a", "Hero": "Knight" },
                "Player2": { "ID": "b", "Hero": "Knight" }
            }"#,
        );
        let err = bootstrap_scenario(&s, Path::new(".")).unwrap_err();
        assert!(matches!(err, BootstrapError::UnknownCommand(_)));
    }

    #[test]
    fn test_odd_field_size_rejected() {
        let s = scenario(
            r#"{
                "ContentDirectory": "content",
                "Player1": { "ID": "a", "Hero": "Knight" },
                "Player2": { "ID": "b", "Hero": "Knight" },
                "Settings": { "FieldSize": 7 }
            }"#,
        );
        let err = bootstrap_scenario(&s, Path::new(".")).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidFieldSize(7)));
    }

    #[test]
    fn test_missing_scenario_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = bootstrap(dir.path().join("game.json")).unwrap_err();
        assert!(matches!(err, BootstrapError::Io { .. }));
    }
}
