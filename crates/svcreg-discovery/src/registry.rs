//! Contract registry
//!
//! Deduplicating set of contracts that must be made resolvable, keyed by
//! contract identity. Registering an identity twice merges origins and
//! never creates a second entry.

use crate::validator::ValidatedType;
use std::collections::HashMap;
use svcreg_domain::{
    ContractIdentity, ContractSurface, LifecycleState, RegistrationOrigin, RegistryEntry,
};
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct ContractRegistry {
    entries: HashMap<ContractIdentity, RegistryEntry>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contract; returns `false` if it was already present
    pub fn register(&mut self, surface: ContractSurface, origin: RegistrationOrigin) -> bool {
        if let Some(existing) = self.entries.get_mut(&surface.contract) {
            existing.origins.insert(origin);
            debug!(contract = %surface.contract, %origin, "Contract already registered");
            return false;
        }
        debug!(contract = %surface.contract, %origin, "Registering contract");
        self.entries
            .insert(surface.contract.clone(), RegistryEntry::new(surface, origin));
        true
    }

    /// Register everything a validated type contributes
    ///
    /// The type itself if contract-marked, plus the declared type of each
    /// injection point whether or not that type is marked.
    pub fn absorb(&mut self, validated: &ValidatedType) -> usize {
        let mut added = 0;
        if let Some(surface) = &validated.contract {
            added += usize::from(self.register(surface.clone(), RegistrationOrigin::ContractMarker));
        }
        for point in &validated.injection_points {
            added += usize::from(self.register(point.surface.clone(), RegistrationOrigin::InjectionPoint));
        }
        added
    }

    pub fn contains(&self, contract: &ContractIdentity) -> bool {
        self.entries.contains_key(contract)
    }

    pub fn get(&self, contract: &ContractIdentity) -> Option<&RegistryEntry> {
        self.entries.get(contract)
    }

    /// `Discovered` for a registered contract; a container tracks the rest
    pub fn state(&self, contract: &ContractIdentity) -> Option<LifecycleState> {
        self.contains(contract).then_some(LifecycleState::Discovered)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by identity
    pub fn entries(&self) -> Vec<&RegistryEntry> {
        let mut entries: Vec<&RegistryEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.contract.cmp(&b.contract));
        entries
    }

    /// Owned entries sorted by identity
    pub fn into_entries(self) -> Vec<RegistryEntry> {
        let mut entries: Vec<RegistryEntry> = self.entries.into_values().collect();
        entries.sort_by(|a, b| a.contract.cmp(&b.contract));
        entries
    }
}
