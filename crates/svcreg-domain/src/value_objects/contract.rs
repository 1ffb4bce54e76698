//! Contract identity and method surface

use super::descriptor::{MethodSignature, TypeDescriptor};
use super::namespace::Namespace;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical reference to a type eligible for proxying
///
/// Two identities are equal iff they name the same type. The qualified
/// name is normalized through [`Namespace::parse`], so `a.b.Greeter` and
/// `a::b::Greeter` are the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ContractIdentity {
    qualified_name: String,
}

impl ContractIdentity {
    pub fn new(qualified_name: impl AsRef<str>) -> Self {
        Self {
            qualified_name: Namespace::parse(qualified_name.as_ref()).to_string(),
        }
    }

    /// Identity of the type `name` declared in `namespace`
    pub fn in_namespace(namespace: &Namespace, name: &str) -> Self {
        Self {
            qualified_name: namespace.child(name).to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.qualified_name
    }

    /// Type name without its namespace
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Namespace the type is declared in
    pub fn namespace(&self) -> Namespace {
        Namespace::parse(&self.qualified_name)
            .parent()
            .unwrap_or_default()
    }

    /// Registration name derived from the simple name (`HelloService` -> `helloService`)
    pub fn registration_name(&self) -> String {
        let simple = self.simple_name();
        let mut chars = simple.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ContractIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

impl From<&str> for ContractIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ContractIdentity {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<ContractIdentity> for String {
    fn from(identity: ContractIdentity) -> Self {
        identity.qualified_name
    }
}

/// Method list of a pure interface, the dispatch table of its proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSurface {
    pub contract: ContractIdentity,
    pub methods: Vec<MethodSignature>,
}

impl ContractSurface {
    pub fn new(contract: ContractIdentity, methods: Vec<MethodSignature>) -> Self {
        Self { contract, methods }
    }

    /// Surface of a descriptor that must be a pure interface
    pub fn from_descriptor(descriptor: &TypeDescriptor) -> Result<Self> {
        if !descriptor.is_interface() {
            return Err(Error::invalid_contract_shape(
                descriptor.identity.as_str(),
                format!(
                    "is {}, only traits can be contracts",
                    descriptor.kind.with_article()
                ),
            ));
        }
        if let Some(method) = descriptor.methods.iter().find(|m| m.has_default) {
            return Err(Error::invalid_contract_shape(
                descriptor.identity.as_str(),
                format!(
                    "is not a pure interface, method `{}` has a default body",
                    method.name
                ),
            ));
        }
        Ok(Self::new(
            descriptor.identity.clone(),
            descriptor.methods.clone(),
        ))
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }
}
