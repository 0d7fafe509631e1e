//! Adapter lookup by framework identifier.

use std::collections::BTreeMap;

use crate::react::ReactAdapter;
use crate::solid::SolidAdapter;
use crate::traits::{FrameworkAdapter, TransformError};
use crate::vue::VueAdapter;

/// A registry of framework adapters keyed by identifier.
pub struct AdapterRegistry {
    adapters: BTreeMap<&'static str, Box<dyn FrameworkAdapter>>,
}

impl AdapterRegistry {
    /// Create a registry holding every built-in adapter.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ReactAdapter::new()));
        registry.register(Box::new(ReactAdapter::preact()));
        registry.register(Box::new(SolidAdapter::new()));
        registry.register(Box::new(VueAdapter::new()));
        registry
    }

    /// Create a registry with no adapters.
    pub fn empty() -> Self {
        Self {
            adapters: BTreeMap::new(),
        }
    }

    /// Add an adapter, replacing any with the same name.
    pub fn register(&mut self, adapter: Box<dyn FrameworkAdapter>) {
        self.adapters.insert(adapter.name(), adapter);
    }

    /// Look up an adapter by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&dyn FrameworkAdapter, TransformError> {
        self.adapters
            .get(name.to_lowercase().as_str())
            .map(|a| &**a)
            .ok_or_else(|| TransformError::UnknownFramework(name.to_string()))
    }

    /// Check if an adapter exists.
    pub fn contains(&self, name: &str) -> bool {
        self.adapters.contains_key(name.to_lowercase().as_str())
    }

    /// Get all registered adapter names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
