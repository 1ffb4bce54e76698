//! Ports
//!
//! Seams between the core and its collaborators: where type-describing
//! artifacts come from, how proxies are built and which container
//! receives the registrations.

pub mod artifact;
pub mod container;
pub mod factory;

pub use artifact::{ArtifactRef, ArtifactSource};
pub use container::{ContractContainer, ContractContainerExt, Injectable};
pub use factory::ProxyFactory;
