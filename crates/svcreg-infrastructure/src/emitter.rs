//! Resolution descriptor emitter
//!
//! Turns registry entries into registration records and hands them to a
//! container. Every record shares one proxy factory.

use serde::Serialize;
use std::sync::Arc;
use svcreg_domain::{ContractContainer, ProxyFactory, RegistrationRecord, RegistryEntry, Result};
use tracing::{debug, info};

/// Counts of one publish call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishOutcome {
    pub registered: usize,
    /// Records whose contract the container already held
    pub skipped: usize,
}

pub struct ResolutionEmitter {
    factory: Arc<dyn ProxyFactory>,
}

impl ResolutionEmitter {
    pub fn new(factory: Arc<dyn ProxyFactory>) -> Self {
        Self { factory }
    }

    /// One record per entry, in entry order
    pub fn emit<'e, I>(&self, entries: I) -> Vec<RegistrationRecord>
    where
        I: IntoIterator<Item = &'e RegistryEntry>,
    {
        entries
            .into_iter()
            .map(|entry| RegistrationRecord::for_entry(entry, Arc::clone(&self.factory)))
            .collect()
    }

    /// Register records the container does not hold yet
    ///
    /// Re-publishing a contract is a no-op; the container's existing
    /// registration and any proxy it already cached stay untouched.
    pub fn publish(
        &self,
        records: Vec<RegistrationRecord>,
        container: &dyn ContractContainer,
    ) -> Result<PublishOutcome> {
        let mut outcome = PublishOutcome::default();
        for record in records {
            if container.contains(&record.contract) {
                debug!(contract = %record.contract, "Already registered, skipping");
                outcome.skipped += 1;
                continue;
            }
            if container.register(record)? {
                outcome.registered += 1;
            } else {
                outcome.skipped += 1;
            }
        }
        info!(
            registered = outcome.registered,
            skipped = outcome.skipped,
            "Registration records published"
        );
        Ok(outcome)
    }
}
