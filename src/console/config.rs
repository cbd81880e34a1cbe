//! Console session configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Scenario file read at startup.
pub const DEFAULT_SCENARIO_PATH: &str = "game.json";

/// Delay before each frame, giving the engine time to settle.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the console session runs.
///
/// ```
/// use duel_console::console::ConsoleConfig;
/// use std::time::Duration;
///
/// let config = ConsoleConfig::default()
///     .with_poll_interval(Duration::ZERO)
///     .with_clear_screen(false);
/// assert_eq!(config.scenario_path.to_str(), Some("game.json"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub scenario_path: PathBuf,
    pub poll_interval: Duration,
    /// Clear the terminal after each input line.
    pub clear_screen: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            scenario_path: PathBuf::from(DEFAULT_SCENARIO_PATH),
            poll_interval: DEFAULT_POLL_INTERVAL,
            clear_screen: true,
        }
    }
}

impl ConsoleConfig {
    #[must_use]
    pub fn with_scenario_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario_path = path.into();
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }
}
