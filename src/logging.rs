//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `DUEL_LOG=debug`).
pub const LOG_ENV: &str = "DUEL_LOG";

/// Filter used when `DUEL_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Logs go to stderr so they never land
/// inside a rendered frame. Calling this twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
