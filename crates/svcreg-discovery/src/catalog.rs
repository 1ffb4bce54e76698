//! Type catalog
//!
//! Every type readable from a source, used to decide whether the declared
//! type of an injection point is a pure interface. Injection points may
//! reference types outside the scan roots, so the catalog always covers
//! the whole source.

use crate::scan::NamespaceScanner;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use svcreg_domain::{ContractIdentity, DeclaredType, Result, TypeDescriptor, TypeKind};
use tracing::debug;

/// Looks up the descriptor behind a field's declared type
pub trait TypeResolver {
    fn resolve(&self, declared: &DeclaredType) -> Result<Option<&TypeDescriptor>>;
}

/// Descriptors keyed by identity, with a simple-name index
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    by_identity: HashMap<ContractIdentity, TypeDescriptor>,
    by_simple_name: HashMap<String, Vec<ContractIdentity>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the whole source into a catalog
    pub fn build(scanner: &NamespaceScanner<'_>) -> Result<Self> {
        let mut catalog = Self::new();
        for descriptor in scanner.scan_all()? {
            catalog.insert(descriptor?);
        }
        debug!(types = catalog.len(), "Type catalog built");
        Ok(catalog)
    }

    pub fn from_descriptors<I: IntoIterator<Item = TypeDescriptor>>(descriptors: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.insert(descriptor);
        }
        catalog
    }

    /// Add a descriptor, merging with one already known under the same identity
    ///
    /// An inherent impl in another file yields a second descriptor for the
    /// same type; the declared kind wins over the impl-only placeholder.
    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        match self.by_identity.get_mut(&descriptor.identity) {
            Some(existing) => {
                if existing.kind == TypeKind::Impl {
                    existing.kind = descriptor.kind;
                    existing.methods = descriptor.methods;
                }
                existing.contract_marked |= descriptor.contract_marked;
                if existing.enable_roots.is_none() {
                    existing.enable_roots = descriptor.enable_roots;
                }
                existing.fields.extend(descriptor.fields);
            }
            None => {
                self.by_simple_name
                    .entry(descriptor.identity.simple_name().to_string())
                    .or_default()
                    .push(descriptor.identity.clone());
                self.by_identity
                    .insert(descriptor.identity.clone(), descriptor);
            }
        }
    }

    pub fn get(&self, identity: &ContractIdentity) -> Option<&TypeDescriptor> {
        self.by_identity.get(identity)
    }

    /// Exact match on the resolved path, else a unique simple-name match
    pub fn lookup(&self, declared: &DeclaredType) -> Option<&TypeDescriptor> {
        if let Some(found) = self.by_identity.get(&declared.resolved) {
            return Some(found);
        }
        match self.by_simple_name.get(declared.resolved.simple_name()) {
            Some(candidates) if candidates.len() == 1 => self.by_identity.get(&candidates[0]),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.by_identity.values()
    }
}

impl TypeResolver for TypeCatalog {
    fn resolve(&self, declared: &DeclaredType) -> Result<Option<&TypeDescriptor>> {
        Ok(self.lookup(declared))
    }
}

/// Catalog built on first lookup and reused for the rest of the pass
pub struct LazyCatalog<'s, 'a> {
    scanner: &'s NamespaceScanner<'a>,
    cell: OnceCell<TypeCatalog>,
}

impl<'s, 'a> LazyCatalog<'s, 'a> {
    pub fn new(scanner: &'s NamespaceScanner<'a>) -> Self {
        Self {
            scanner,
            cell: OnceCell::new(),
        }
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl TypeResolver for LazyCatalog<'_, '_> {
    fn resolve(&self, declared: &DeclaredType) -> Result<Option<&TypeDescriptor>> {
        let catalog = self.cell.get_or_try_init(|| TypeCatalog::build(self.scanner))?;
        Ok(catalog.lookup(declared))
    }
}
