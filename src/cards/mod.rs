//! Card system: imprints, instances, and the content registry.
//!
//! ## Key Types
//!
//! - `Imprint`: Immutable card template (base stats, identity)
//! - `HeroImprint`: Immutable hero template
//! - `CardInstance`: Runtime card state derived from an imprint
//! - `ContentRegistry`: Imprint lookup

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{HeroImprint, Imprint};
pub use instance::CardInstance;
pub use registry::ContentRegistry;
