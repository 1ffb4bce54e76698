//! Type and field descriptors built from static source metadata

use super::contract::ContractIdentity;
use super::namespace::Namespace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a scanned item
///
/// Items other than type declarations are only described when they carry
/// a marker, so a misplaced marker is still seen by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Trait,
    Struct,
    Enum,
    Union,
    TypeAlias,
    Function,
    Const,
    Static,
    /// An `impl` block, or the type only an `impl` block reveals
    Impl,
}

impl TypeKind {
    /// Display name with its indefinite article (`a trait`, `an enum`)
    pub fn with_article(self) -> String {
        match self {
            Self::Enum | Self::Impl => format!("an {self}"),
            _ => format!("a {self}"),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trait => write!(f, "trait"),
            Self::Struct => write!(f, "struct"),
            Self::Enum => write!(f, "enum"),
            Self::Union => write!(f, "union"),
            Self::TypeAlias => write!(f, "type alias"),
            Self::Function => write!(f, "function"),
            Self::Const => write!(f, "const"),
            Self::Static => write!(f, "static"),
            Self::Impl => write!(f, "impl block"),
        }
    }
}

/// How a method takes `self`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`
    Owned,
    /// Associated function without a receiver
    None,
}

/// A method declared by a trait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub receiver: Receiver,
    /// Parameter types as written, receiver excluded
    pub params: Vec<String>,
    /// Return type as written, `None` for `()`
    pub returns: Option<String>,
    /// True if the trait provides a default body
    #[serde(default)]
    pub has_default: bool,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, receiver: Receiver) -> Self {
        Self {
            name: name.into(),
            receiver,
            params: Vec::new(),
            returns: None,
            has_default: false,
        }
    }

    pub fn with_param(mut self, ty: impl Into<String>) -> Self {
        self.params.push(ty.into());
        self
    }

    pub fn with_return(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn with_default_body(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Declared type of a field, as written and as resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredType {
    /// Source text, e.g. `Arc<dyn Greeter + Send + Sync>`
    pub written: String,
    /// Qualified path of the type behind wrappers and `dyn`
    pub resolved: ContractIdentity,
    /// True if written as a trait object
    pub is_dyn: bool,
}

impl DeclaredType {
    pub fn new(written: impl Into<String>, resolved: ContractIdentity, is_dyn: bool) -> Self {
        Self {
            written: written.into(),
            resolved,
            is_dyn,
        }
    }
}

/// A field of a scanned type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Type declaring the field
    pub owner: ContractIdentity,
    /// Field name, the index for tuple fields; enum variant fields are
    /// prefixed with the variant (`Remote::greeter`, `Local::0`)
    pub name: String,
    /// True for associated consts, shared by every instance
    pub is_static: bool,
    pub declared_type: DeclaredType,
    /// True if the inject marker is present
    pub injected: bool,
}

/// A type discovered by the scanner, without running any of its code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub identity: ContractIdentity,
    pub namespace: Namespace,
    pub kind: TypeKind,
    /// Declared methods, only populated for traits
    pub methods: Vec<MethodSignature>,
    pub fields: Vec<FieldDescriptor>,
    /// True if the contract marker is present
    pub contract_marked: bool,
    /// Roots of the enabling marker, `Some` only when the marker is present
    pub enable_roots: Option<Vec<String>>,
    /// Location of the artifact declaring the type
    pub artifact: String,
}

impl TypeDescriptor {
    pub fn new(namespace: Namespace, name: &str, kind: TypeKind, artifact: impl Into<String>) -> Self {
        Self {
            identity: ContractIdentity::in_namespace(&namespace, name),
            namespace,
            kind,
            methods: Vec::new(),
            fields: Vec::new(),
            contract_marked: false,
            enable_roots: None,
            artifact: artifact.into(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Trait
    }

    /// A trait whose methods are all bodiless
    pub fn is_pure_interface(&self) -> bool {
        self.is_interface() && self.methods.iter().all(|m| !m.has_default)
    }

    pub fn is_enabling(&self) -> bool {
        self.enable_roots.is_some()
    }

    /// Fields carrying the inject marker
    pub fn injection_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.injected)
    }
}
