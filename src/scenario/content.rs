//! Content loading.
//!
//! Content lives in two folders under the content root:
//!
//! - `heroes/<id>.json`: `{ "HeroId": "...", "Life": 20 }`
//! - `cards/<id>.json`: `{ "CardId": "...", "Attack": 1, "Armor": 0, "Life": 2, "Cost": 1 }`
//!
//! Each file is read at most once; later requests for the same id hit the
//! registry. Every load from disk is logged at `info`.

use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::BootstrapError;
use crate::cards::{ContentRegistry, HeroImprint, Imprint};

/// Loads imprints from a content root into a `ContentRegistry`.
#[derive(Debug)]
pub struct ContentLoader {
    root: PathBuf,
    registry: ContentRegistry,
}

impl ContentLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registry: ContentRegistry::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a hero by id.
    pub fn load_hero(&mut self, hero_id: &str) -> Result<HeroImprint, BootstrapError> {
        if let Some(hero) = self.registry.hero(hero_id) {
            return Ok(hero.clone());
        }

        let path = content_path(&self.root, "heroes", hero_id)?;
        let hero: HeroImprint = read_json(&path, "hero", hero_id)?;
        if hero.hero_id != hero_id {
            return Err(BootstrapError::IdMismatch {
                path,
                expected: hero_id.to_string(),
                found: hero.hero_id,
            });
        }

        info!(hero = hero_id, path = %path.display(), "loaded hero");
        self.registry.register_hero(hero.clone());
        Ok(hero)
    }

    /// Load a card imprint by id.
    pub fn load_card(&mut self, card_id: &str) -> Result<Arc<Imprint>, BootstrapError> {
        if let Some(imprint) = self.registry.card(card_id) {
            return Ok(imprint);
        }

        let path = content_path(&self.root, "cards", card_id)?;
        let imprint: Imprint = read_json(&path, "card", card_id)?;
        if imprint.card_id != card_id {
            return Err(BootstrapError::IdMismatch {
                path,
                expected: card_id.to_string(),
                found: imprint.card_id,
            });
        }

        info!(card = card_id, path = %path.display(), "loaded card");
        Ok(self.registry.register_card(imprint))
    }

    /// Finish loading and hand over the registry.
    #[must_use]
    pub fn into_registry(self) -> ContentRegistry {
        self.registry
    }
}

/// Path of `<root>/<folder>/<id>.json`, refusing ids that would escape it.
fn content_path(root: &Path, folder: &str, id: &str) -> Result<PathBuf, BootstrapError> {
    let invalid = id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']);
    if invalid {
        return Err(BootstrapError::InvalidContentId(id.to_string()));
    }
    Ok(root.join(folder).join(format!("{id}.json")))
}

fn read_json<T: DeserializeOwned>(
    path: &Path,
    kind: &'static str,
    id: &str,
) -> Result<T, BootstrapError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            BootstrapError::MissingContent {
                kind,
                id: id.to_string(),
                path: path.to_path_buf(),
            }
        } else {
            BootstrapError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|source| BootstrapError::Json {
        path: path.to_path_buf(),
        source,
    })
}
