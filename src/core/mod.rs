//! Core duel types: entities, players, resources, state, RNG, settings.
//!
//! This module holds the state the engine thread owns and the read-only
//! snapshot the console works with.

pub mod entity;
pub mod player;
pub mod resources;
pub mod rng;
pub mod config;
pub mod state;

pub use entity::EntityId;
pub use player::{Player, PlayerId, PlayerMap};
pub use resources::{InsufficientResources, Resource, ResourcePool};
pub use rng::GameRng;
pub use config::DuelSettings;
pub use state::{DuelSnapshot, DuelState, TurnData};
