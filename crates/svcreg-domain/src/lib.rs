//! Domain layer for svcreg
//!
//! Contract identities, type and field descriptors, registration records,
//! the stub proxy handle and the ports the discovery and infrastructure
//! layers implement. Free of I/O.

pub mod constants;
pub mod error;
pub mod ports;
pub mod proxy;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    ArtifactRef, ArtifactSource, ContractContainer, ContractContainerExt, Injectable, ProxyFactory,
};
pub use proxy::{Contract, ContractProxy, DispatchHandler, StubResult};
pub use value_objects::{
    ConstructionStrategy, ContractIdentity, ContractSurface, DeclaredType, FieldDescriptor,
    InjectionMatch, LifecycleState, MethodSignature, Namespace, Receiver, RegistrationOrigin,
    RegistrationRecord, RegistryEntry, Scope, TypeDescriptor, TypeKind,
};
