//! Card locations.
//!
//! Hands and graves live on `Player` as ordered `im` vectors. The only shared
//! zone is the `Field`, a fixed row of slots split between the two duelists.
//!
//! ## Key Types
//!
//! - `Field`: Fixed-size slot sequence with row ownership
//! - `FieldSlot`: One position, empty or holding a card
//! - `PlacementError`: Why a card could not enter a slot

pub mod field;

pub use field::{Field, FieldSlot, PlacementError};
