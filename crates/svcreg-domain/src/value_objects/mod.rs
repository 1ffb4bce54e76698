//! Value objects
//!
//! Immutable data shared by scanning, validation, registration and dispatch.

pub mod contract;
pub mod descriptor;
pub mod namespace;
pub mod registration;

pub use contract::{ContractIdentity, ContractSurface};
pub use descriptor::{
    DeclaredType, FieldDescriptor, MethodSignature, Receiver, TypeDescriptor, TypeKind,
};
pub use namespace::Namespace;
pub use registration::{
    ConstructionStrategy, InjectionMatch, LifecycleState, RegistrationOrigin, RegistrationRecord,
    RegistryEntry, Scope,
};
