//! Named resource counters (the player's mana pool).
//!
//! Counters keep the order they were declared in the scenario. Costs are paid
//! by draining counters front to back.

use thiserror::Error;

/// One named counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Resource type name (e.g. "Fire").
    pub name: String,
    /// Units currently available.
    pub count: u32,
}

/// Cost could not be paid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("needs {needed} resources but only {available} are available")]
pub struct InsufficientResources {
    pub needed: u32,
    pub available: u32,
}

/// Ordered pool of resource counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourcePool {
    resources: Vec<Resource>,
}

impl ResourcePool {
    /// Create a pool with one empty counter per name. Duplicate names collapse.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut resources: Vec<Resource> = Vec::new();
        for name in names {
            let name = name.into();
            if !resources.iter().any(|r| r.name == name) {
                resources.push(Resource { name, count: 0 });
            }
        }
        Self { resources }
    }

    /// Iterate over counters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Count for a named resource.
    #[must_use]
    pub fn count(&self, name: &str) -> Option<u32> {
        self.resources.iter().find(|r| r.name == name).map(|r| r.count)
    }

    /// Sum over all counters.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.resources.iter().map(|r| r.count).sum()
    }

    /// Add `amount` to every counter.
    pub fn charge(&mut self, amount: u32) {
        for resource in &mut self.resources {
            resource.count = resource.count.saturating_add(amount);
        }
    }

    /// Pay `cost` units, draining counters in order. Nothing changes on failure.
    pub fn spend(&mut self, cost: u32) -> Result<(), InsufficientResources> {
        let available = self.total();
        if available < cost {
            return Err(InsufficientResources {
                needed: cost,
                available,
            });
        }

        let mut remaining = cost;
        for resource in &mut self.resources {
            if remaining == 0 {
                break;
            }
            let taken = resource.count.min(remaining);
            resource.count -= taken;
            remaining -= taken;
        }
        Ok(())
    }

    /// Whether the pool has no counters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
