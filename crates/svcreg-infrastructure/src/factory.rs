//! Stub proxy factory
//!
//! Knows the surface of every registered contract and builds a proxy that
//! answers the stub result for each of its methods.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use svcreg_domain::{
    Contract, ContractIdentity, ContractProxy, ContractSurface, Error, ProxyFactory, RegistryEntry,
    Result,
};
use tracing::debug;

/// Builds stub proxies for a fixed set of contract surfaces
#[derive(Debug, Default)]
pub struct StubProxyFactory {
    surfaces: HashMap<ContractIdentity, Arc<ContractSurface>>,
    constructed: AtomicUsize,
}

impl StubProxyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory for every contract a registry holds
    pub fn from_entries<'e, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'e RegistryEntry>,
    {
        entries
            .into_iter()
            .fold(Self::new(), |factory, entry| factory.with_surface(entry.surface.clone()))
    }

    pub fn with_surface(mut self, surface: ContractSurface) -> Self {
        self.surfaces
            .insert(surface.contract.clone(), Arc::new(surface));
        self
    }

    /// Add the surface of a `#[contract]` trait
    pub fn with_contract<C: Contract + ?Sized>(self) -> Self {
        self.with_surface(C::surface())
    }

    pub fn knows(&self, contract: &ContractIdentity) -> bool {
        self.surfaces.contains_key(contract)
    }

    /// Number of proxies built so far
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }
}

impl ProxyFactory for StubProxyFactory {
    fn create_proxy(&self, contract: &ContractIdentity) -> Result<ContractProxy> {
        let surface = self.surfaces.get(contract).ok_or_else(|| {
            Error::invalid_contract_shape(contract.as_str(), "is not a known pure interface")
        })?;
        if let Some(method) = surface.methods.iter().find(|m| m.has_default) {
            return Err(Error::invalid_contract_shape(
                contract.as_str(),
                format!("has a default body for `{}`", method.name),
            ));
        }

        self.constructed.fetch_add(1, Ordering::SeqCst);
        debug!(contract = %contract, methods = surface.methods.len(), "Constructing stub proxy");
        Ok(ContractProxy::stub(Arc::clone(surface)))
    }
}
