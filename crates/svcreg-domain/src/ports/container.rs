//! Container port
//!
//! The external container owns general wiring and lifecycles; the core
//! only hands it registration records and asks it to resolve contracts.

use crate::error::Result;
use crate::proxy::{Contract, ContractProxy};
use crate::value_objects::{ContractIdentity, FieldDescriptor, RegistrationRecord};
use std::sync::Arc;

/// Receives registration records and resolves contracts by type
pub trait ContractContainer: Send + Sync {
    fn contains(&self, contract: &ContractIdentity) -> bool;

    /// Add a record; `Ok(false)` if the contract was already registered
    fn register(&self, record: RegistrationRecord) -> Result<bool>;

    /// The singleton proxy for `contract`, built on first demand
    fn resolve(&self, contract: &ContractIdentity) -> Result<Arc<ContractProxy>>;
}

/// Typed helpers over any container
pub trait ContractContainerExt {
    /// Resolve a `#[contract]` trait as its trait object
    fn resolve_contract<C: Contract + ?Sized>(&self) -> Result<Arc<C>>;

    /// Resolve an injection point purely by its declared type
    fn resolve_for(&self, field: &FieldDescriptor) -> Result<Arc<ContractProxy>>;
}

impl<T: ContractContainer + ?Sized> ContractContainerExt for T {
    fn resolve_contract<C: Contract + ?Sized>(&self) -> Result<Arc<C>> {
        self.resolve(&C::identity()).map(C::from_proxy)
    }

    fn resolve_for(&self, field: &FieldDescriptor) -> Result<Arc<ContractProxy>> {
        self.resolve(&field.declared_type.resolved)
    }
}

/// Types whose contract fields are filled from a container
///
/// Implemented by `#[derive(Injectable)]`.
pub trait Injectable: Sized {
    fn inject(container: &dyn ContractContainer) -> Result<Self>;
}
