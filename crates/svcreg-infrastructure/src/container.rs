//! Lazy singleton container
//!
//! Holds one slot per registered contract. The first resolution of a slot
//! asks the record's factory for a proxy; every later resolution, from
//! any thread, gets that same proxy.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use svcreg_domain::{
    ContractContainer, ContractIdentity, ContractProxy, Error, LifecycleState, RegistrationRecord,
    Result,
};
use tracing::debug;

struct Slot {
    record: RegistrationRecord,
    constructing: AtomicBool,
    proxy: OnceCell<Arc<ContractProxy>>,
}

impl Slot {
    fn new(record: RegistrationRecord) -> Self {
        Self {
            record,
            constructing: AtomicBool::new(false),
            proxy: OnceCell::new(),
        }
    }

    fn state(&self) -> LifecycleState {
        if self.proxy.get().is_some() {
            LifecycleState::Cached
        } else if self.constructing.load(Ordering::SeqCst) {
            LifecycleState::ProxyConstructed
        } else {
            LifecycleState::Registered
        }
    }

    fn resolve(&self) -> Result<Arc<ContractProxy>> {
        let proxy = self.proxy.get_or_try_init(|| {
            self.constructing.store(true, Ordering::SeqCst);
            let built = self.record.factory.create_proxy(&self.record.contract);
            if built.is_err() {
                self.constructing.store(false, Ordering::SeqCst);
            }
            built.map(Arc::new)
        })?;
        Ok(Arc::clone(proxy))
    }
}

/// In-process [`ContractContainer`] caching one proxy per contract
#[derive(Default)]
pub struct ProxyContainer {
    slots: DashMap<ContractIdentity, Arc<Slot>>,
}

impl ProxyContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state of `contract`, `None` if it was never registered
    pub fn state(&self, contract: &ContractIdentity) -> Option<LifecycleState> {
        self.slots.get(contract).map(|slot| slot.state())
    }

    /// Registered contracts, sorted
    pub fn contracts(&self) -> Vec<ContractIdentity> {
        let mut contracts: Vec<ContractIdentity> =
            self.slots.iter().map(|slot| slot.key().clone()).collect();
        contracts.sort();
        contracts
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ContractContainer for ProxyContainer {
    fn contains(&self, contract: &ContractIdentity) -> bool {
        self.slots.contains_key(contract)
    }

    fn register(&self, record: RegistrationRecord) -> Result<bool> {
        let contract = record.contract.clone();
        match self.slots.entry(contract) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(vacant) => {
                debug!(contract = %vacant.key(), name = %record.name, "Contract registered");
                vacant.insert(Arc::new(Slot::new(record)));
                Ok(true)
            }
        }
    }

    fn resolve(&self, contract: &ContractIdentity) -> Result<Arc<ContractProxy>> {
        // Clone the slot out so no shard lock is held while the factory runs
        let slot = self
            .slots
            .get(contract)
            .map(|slot| Arc::clone(slot.value()))
            .ok_or_else(|| Error::not_registered(contract.as_str()))?;
        slot.resolve()
    }
}
