use rustc_hash::{FxHashMap, FxHashSet};
use sluice_utils::Identifier;

use super::{FluidEntry, FluidId};
use crate::RegistryExt;

/// Lookup tables for fluids and fluid tags.
pub struct FluidRegistry {
    by_id: FxHashMap<FluidId, FluidEntry>,
    by_name: FxHashMap<&'static str, FluidId>,
    tags: FxHashMap<Identifier, FxHashSet<FluidId>>,
    allows_registering: bool,
}

impl FluidRegistry {
    /// Creates an empty, unfrozen registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: FxHashMap::default(),
            by_name: FxHashMap::default(),
            tags: FxHashMap::default(),
            allows_registering: true,
        }
    }

    /// Registers a fluid.
    ///
    /// # Panics
    /// Panics if the registry has been frozen.
    pub fn register(&mut self, entry: FluidEntry) {
        assert!(
            self.allows_registering,
            "Cannot register fluid after registry is frozen"
        );
        self.by_name.insert(entry.name, entry.id);
        self.by_id.insert(entry.id, entry);
    }

    /// Adds fluids to a tag, creating the tag if needed.
    ///
    /// # Panics
    /// Panics if the registry has been frozen.
    pub fn register_tag(&mut self, tag: Identifier, fluids: &[FluidId]) {
        assert!(
            self.allows_registering,
            "Cannot register fluid tag after registry is frozen"
        );
        self.tags.entry(tag).or_default().extend(fluids.iter().copied());
    }

    /// Looks a fluid up by id.
    #[must_use]
    pub fn get(&self, id: FluidId) -> Option<&FluidEntry> {
        self.by_id.get(&id)
    }

    /// Looks a fluid id up by its persisted name.
    ///
    /// Accepts both `water` and `minecraft:water`.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<FluidId> {
        let path = name
            .strip_prefix(Identifier::VANILLA_NAMESPACE)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(name);
        self.by_name.get(path).copied()
    }

    /// Returns true if the fluid is a member of the tag.
    #[must_use]
    pub fn is_in_tag(&self, id: FluidId, tag: &Identifier) -> bool {
        self.tags.get(tag).is_some_and(|members| members.contains(&id))
    }

    /// Returns true if the tag has been registered.
    #[must_use]
    pub fn has_tag(&self, tag: &Identifier) -> bool {
        self.tags.contains_key(tag)
    }

    /// Iterates over all registered fluids in id order.
    pub fn iter(&self) -> impl Iterator<Item = &FluidEntry> {
        let mut entries: Vec<&FluidEntry> = self.by_id.values().collect();
        entries.sort_by_key(|entry| entry.id);
        entries.into_iter()
    }

    /// Number of registered fluids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for FluidRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryExt for FluidRegistry {
    fn freeze(&mut self) {
        self.allows_registering = false;
    }
}
