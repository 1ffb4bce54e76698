//! Registry entries and the registration records handed to a container

use super::contract::{ContractIdentity, ContractSurface};
use crate::ports::ProxyFactory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Lifetime of a resolved proxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// One instance per container
    #[default]
    Singleton,
}

/// When the proxy gets built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionStrategy {
    /// Built by the factory on first demand
    #[default]
    LazyFactory,
}

/// How injection points are matched to a registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionMatch {
    /// By declared type only, never by name
    #[default]
    ByType,
}

/// Why a contract ended up in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOrigin {
    /// The type itself carries the contract marker
    ContractMarker,
    /// An injection point declares the type
    InjectionPoint,
}

impl fmt::Display for RegistrationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContractMarker => write!(f, "contract-marker"),
            Self::InjectionPoint => write!(f, "injection-point"),
        }
    }
}

/// Lifecycle of one contract identity
///
/// `Discovered -> Registered -> ProxyConstructed -> Cached`, no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Discovered,
    Registered,
    ProxyConstructed,
    Cached,
}

/// A contract that must be made resolvable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub contract: ContractIdentity,
    pub surface: ContractSurface,
    pub origins: BTreeSet<RegistrationOrigin>,
    pub scope: Scope,
    pub construction: ConstructionStrategy,
    pub injection: InjectionMatch,
}

impl RegistryEntry {
    pub fn new(surface: ContractSurface, origin: RegistrationOrigin) -> Self {
        Self {
            contract: surface.contract.clone(),
            surface,
            origins: BTreeSet::from([origin]),
            scope: Scope::default(),
            construction: ConstructionStrategy::default(),
            injection: InjectionMatch::default(),
        }
    }
}

/// What a container needs to resolve one contract
#[derive(Clone, Serialize)]
pub struct RegistrationRecord {
    pub contract: ContractIdentity,
    /// Registration name, derived from the simple type name
    pub name: String,
    pub scope: Scope,
    pub construction: ConstructionStrategy,
    pub injection: InjectionMatch,
    pub methods: Vec<String>,
    #[serde(skip)]
    pub factory: Arc<dyn ProxyFactory>,
}

impl RegistrationRecord {
    pub fn for_entry(entry: &RegistryEntry, factory: Arc<dyn ProxyFactory>) -> Self {
        Self {
            contract: entry.contract.clone(),
            name: entry.contract.registration_name(),
            scope: entry.scope,
            construction: entry.construction,
            injection: entry.injection,
            methods: entry.surface.method_names().map(str::to_string).collect(),
            factory,
        }
    }
}

impl fmt::Debug for RegistrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRecord")
            .field("contract", &self.contract)
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("construction", &self.construction)
            .field("injection", &self.injection)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}
