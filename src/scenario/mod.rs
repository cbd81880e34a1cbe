//! Scenario bootstrap.
//!
//! Turns a scenario file and its content directory into a prepared
//! `DuelState` plus the `Environment` (content registry, random source,
//! settings, enabled commands) the engine runs with. Any failure here is
//! fatal: the session cannot start without a valid environment.

pub mod content;
pub mod loader;
pub mod model;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::command::UnknownCommandName;

pub use content::ContentLoader;
pub use loader::{bootstrap, bootstrap_scenario, Bootstrap, Environment};
pub use model::{GoesFirst, PlayerSpec, Scenario};

/// Why a scenario could not be prepared.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} `{id}` not found (looked for {})", .path.display())]
    MissingContent {
        kind: &'static str,
        id: String,
        path: PathBuf,
    },

    #[error("{} declares `{found}`, expected `{expected}`", .path.display())]
    IdMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("invalid content id `{0}`")]
    InvalidContentId(String),

    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommandName),

    #[error("field size {0} cannot be split into two equal rows")]
    InvalidFieldSize(usize),
}
