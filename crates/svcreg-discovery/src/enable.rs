//! Enabling declaration lookup

use crate::scan::{NamespaceScanner, ScanRoots};
use serde::Serialize;
use svcreg_domain::{ContractIdentity, Error, Result};

/// The entry point carrying the enabling marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnablingDeclaration {
    pub entry_point: ContractIdentity,
    /// Roots as written, blank entries included
    pub explicit_roots: Vec<String>,
}

impl EnablingDeclaration {
    /// Explicit roots, or the entry point's own namespace if none are given
    pub fn scan_roots(&self) -> ScanRoots {
        ScanRoots::explicit_or_inferred(&self.explicit_roots, &self.entry_point)
    }
}

/// Find the single enabling declaration in the source
///
/// `Ok(None)` if there is none; a configuration error if there are several.
pub fn find_enabling_declaration(scanner: &NamespaceScanner<'_>) -> Result<Option<EnablingDeclaration>> {
    let mut found = Vec::new();
    for descriptor in scanner.scan_all()? {
        let descriptor = descriptor?;
        if descriptor.is_enabling() {
            found.push(EnablingDeclaration {
                entry_point: descriptor.identity,
                explicit_roots: descriptor.enable_roots.unwrap_or_default(),
            });
        }
    }

    if found.len() > 1 {
        let names: Vec<String> = found.iter().map(|d| d.entry_point.to_string()).collect();
        return Err(Error::config(format!(
            "several enabling declarations found: {}",
            names.join(", ")
        )));
    }
    Ok(found.pop())
}
