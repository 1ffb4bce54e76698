//! # svcreg
//!
//! Discovers contract traits in Rust source, validates where the contract
//! and inject markers are placed, and makes every discovered contract
//! resolvable as a lazily built singleton stub proxy.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use svcreg::{Injectable, ProxyContainer, contract};
//!
//! #[contract]
//! pub trait HelloService: Send + Sync {
//!     fn hello(&self, name: &str) -> String;
//! }
//!
//! #[derive(Injectable)]
//! pub struct ClientImpl {
//!     #[inject]
//!     greeter: Arc<dyn HelloService>,
//! }
//!
//! let container = ProxyContainer::new();
//! svcreg::register_contract::<dyn HelloService>(&container)?;
//! let client = ClientImpl::inject(&container)?;
//! println!("{}", client.greeter.hello("Alice"));
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Identities, descriptors, proxy handle, ports and errors
//! - `discovery` - Scanner, validator, registry and discovery pipeline
//! - `infrastructure` - Proxy factory, emitter, container, config, logging
//! - `cli` - The `svcreg` command

pub mod cli;

/// Domain layer - identities, descriptors, proxy handle and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use svcreg_domain::*;
}

/// Discovery layer - scanning, validation and registry population
///
/// Re-exports from the discovery crate for convenience
pub mod discovery {
    pub use svcreg_discovery::*;
}

/// Infrastructure layer - factory, emitter, container, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use svcreg_infrastructure::*;
}

use std::sync::Arc;

pub use svcreg_discovery::{ContractRegistry, Discovery, DiscoveryReport, ScanRoots};
pub use svcreg_domain::{
    Contract, ContractContainer, ContractContainerExt, ContractIdentity, ContractProxy,
    ContractSurface, Error, Injectable, LifecycleState, MethodSignature, Receiver,
    RegistrationOrigin, RegistryEntry, Result, StubResult,
};
pub use svcreg_infrastructure::{
    ProxyContainer, PublishOutcome, ResolutionEmitter, StubProxyFactory,
};
pub use svcreg_macros::{Injectable, contract, enable_contracts};

/// Publish a stub registration for every contract in `registry`
pub fn publish_registry(
    registry: &ContractRegistry,
    container: &dyn ContractContainer,
) -> Result<PublishOutcome> {
    let entries = registry.entries();
    let factory = Arc::new(StubProxyFactory::from_entries(entries.iter().copied()));
    let emitter = ResolutionEmitter::new(factory);
    emitter.publish(emitter.emit(entries), container)
}

/// Publish a stub registration for one `#[contract]` trait
pub fn register_contract<C: Contract + ?Sized>(
    container: &dyn ContractContainer,
) -> Result<PublishOutcome> {
    let entry = RegistryEntry::new(C::surface(), RegistrationOrigin::ContractMarker);
    let factory = Arc::new(StubProxyFactory::new().with_surface(entry.surface.clone()));
    let emitter = ResolutionEmitter::new(factory);
    emitter.publish(emitter.emit([&entry]), container)
}

/// Where `contract` stands, from discovery through to a cached proxy
///
/// The container's state wins once the contract is published there.
pub fn lifecycle_state(
    registry: &ContractRegistry,
    container: &ProxyContainer,
    contract: &ContractIdentity,
) -> Option<LifecycleState> {
    container
        .state(contract)
        .or_else(|| registry.state(contract))
}
