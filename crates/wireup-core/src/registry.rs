//! # Module Registry
//!
//! Insertion-ordered map from module id to module handle. Re-registering an
//! existing id replaces the handle but keeps the entry's original position,
//! so `init` iteration order is stable under replacement.

use crate::module::DynModule;

/// Ordered registry of child modules, keyed by id.
pub struct ModuleRegistry {
    /// Entries in insertion order. Small trees make linear key lookup
    /// cheaper than keeping a side index in sync.
    entries: Vec<(String, DynModule)>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a module under `id`.
    ///
    /// Last-write-wins: an existing entry with the same id is replaced in
    /// place, keeping its iteration position.
    ///
    /// # Returns
    ///
    /// Whether an existing entry was replaced.
    pub fn insert(&mut self, id: impl Into<String>, module: DynModule) -> bool {
        let id = id.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == id) {
            slot.1 = module;
            return true;
        }
        self.entries.push((id, module));
        false
    }

    /// Look up a module by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<DynModule> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, module)| std::sync::Arc::clone(module))
    }

    /// Whether an entry exists for `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == id)
    }

    /// Registered ids, in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all entries, in insertion order.
    ///
    /// `init` iterates the snapshot so no registry lock is held while child
    /// futures run.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, DynModule)> {
        self.entries
            .iter()
            .map(|(key, module)| (key.clone(), std::sync::Arc::clone(module)))
            .collect()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
