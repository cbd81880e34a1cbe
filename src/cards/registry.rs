//! Content registry for imprint lookup.
//!
//! The `ContentRegistry` stores every card and hero imprint loaded for a duel.
//! Card imprints are held behind `Arc` so that each `CardInstance` shares its
//! template instead of copying it.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::definition::{HeroImprint, Imprint};

/// Registry of loaded imprints.
///
/// ```
/// use duel_console::cards::{ContentRegistry, Imprint};
///
/// let mut registry = ContentRegistry::new();
/// registry.register_card(Imprint::new("Squire", 1, 0, 2, 1));
///
/// let found = registry.card("Squire").unwrap();
/// assert_eq!(found.attack, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    cards: FxHashMap<String, Arc<Imprint>>,
    heroes: FxHashMap<String, HeroImprint>,
}

impl ContentRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card imprint, replacing any earlier one with the same id.
    ///
    /// Returns the shared handle now stored in the registry.
    pub fn register_card(&mut self, imprint: Imprint) -> Arc<Imprint> {
        let imprint = Arc::new(imprint);
        self.cards
            .insert(imprint.card_id.clone(), Arc::clone(&imprint));
        imprint
    }

    /// Register a hero imprint, replacing any earlier one with the same id.
    pub fn register_hero(&mut self, hero: HeroImprint) {
        self.heroes.insert(hero.hero_id.clone(), hero);
    }

    /// Get a card imprint by id.
    #[must_use]
    pub fn card(&self, card_id: &str) -> Option<Arc<Imprint>> {
        self.cards.get(card_id).cloned()
    }

    /// Get a hero imprint by id.
    #[must_use]
    pub fn hero(&self, hero_id: &str) -> Option<&HeroImprint> {
        self.heroes.get(hero_id)
    }

    /// Number of registered card imprints.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of registered heroes.
    #[must_use]
    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }

    /// One line per loaded key, sorted, for the startup summary.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        let mut heroes: Vec<_> = self.heroes.keys().map(|k| format!("Hero: {k}")).collect();
        let mut cards: Vec<_> = self.cards.keys().map(|k| format!("Card: {k}")).collect();
        heroes.sort();
        cards.sort();
        heroes.extend(cards);
        heroes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = ContentRegistry::new();
        registry.register_card(Imprint::new("Squire", 1, 0, 2, 1));

        assert!(registry.card("Squire").is_some());
        assert!(registry.card("Dragon").is_none());
        assert_eq!(registry.card_count(), 1);
    }

    #[test]
    fn test_cards_share_imprint() {
        let mut registry = ContentRegistry::new();
        let handle = registry.register_card(Imprint::new("Squire", 1, 0, 2, 1));
        let again = registry.card("Squire").unwrap();

        assert!(Arc::ptr_eq(&handle, &again));
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = ContentRegistry::new();
        registry.register_card(Imprint::new("Squire", 1, 0, 2, 1));
        registry.register_card(Imprint::new("Squire", 3, 0, 2, 1));

        assert_eq!(registry.card_count(), 1);
        assert_eq!(registry.card("Squire").unwrap().attack, 3);
    }

    #[test]
    fn test_summary_is_sorted_heroes_first() {
        let mut registry = ContentRegistry::new();
        registry.register_card(Imprint::new("Wall", 0, 3, 5, 2));
        registry.register_card(Imprint::new("Squire", 1, 0, 2, 1));
        registry.register_hero(HeroImprint::new("Knight", 20));

        assert_eq!(
            registry.summary(),
            vec!["Hero: Knight", "Card: Squire", "Card: Wall"]
        );
        assert_eq!(registry.hero_count(), 1);
    }
}
