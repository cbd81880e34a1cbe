//! # duel-console
//!
//! An interactive text console driving a turn-based card duel that runs on
//! its own engine thread.
//!
//! ## Design Principles
//!
//! 1. **Engine Owns State**: Only the engine thread mutates the duel. The
//!    console reads snapshots and queues commands, nothing else.
//!
//! 2. **Validate Locally, Resolve Late**: Typed lines are checked against the
//!    current hand and field sizes. Positional indices are turned into stable
//!    entity ids only against the snapshot taken right before the enqueue.
//!
//! 3. **Configuration Over Convention**: Content, enabled commands and rule
//!    tuning come from the scenario file.
//!
//! ## Architecture
//!
//! - **Snapshot Reads**: State sits behind an `RwLock`; persistent `im`
//!   vectors make each snapshot an O(1) copy taken under a brief read lock.
//!
//! - **FIFO Command Queue**: An unbounded channel carries commands to the
//!   engine thread in submission order without ever blocking the console.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, resources, state, RNG, settings
//! - `cards`: Imprints, card instances, content registry
//! - `zones`: The field and its slots
//! - `command`: Canonical commands and input validation
//! - `rules`: RulesEngine trait and the standard rule set
//! - `engine`: Engine facade and the threaded duel flow
//! - `scenario`: Scenario file and content loading
//! - `console`: Rendering and the session driver
//! - `logging`: Subscriber setup

pub mod core;
pub mod cards;
pub mod zones;
pub mod command;
pub mod rules;
pub mod engine;
pub mod scenario;
pub mod console;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap, Player,
    GameRng, DuelSettings, ResourcePool,
    DuelState, DuelSnapshot, TurnData,
};

pub use crate::cards::{Imprint, HeroImprint, CardInstance, ContentRegistry};

pub use crate::zones::{Field, FieldSlot};

pub use crate::command::{
    Command, CommandArg, CommandName,
    validate, CommandRequest, Directive, ObservedBounds, Rejection,
};

pub use crate::rules::{RulesEngine, DuelResult, RuleViolation, StandardRules};

pub use crate::engine::{EngineFacade, EngineError, DuelFlow};

pub use crate::scenario::{bootstrap, Bootstrap, BootstrapError, Environment};

pub use crate::console::{ConsoleConfig, SessionDriver, SessionOutcome, TerminationCause};
