//! Discovery pipeline
//!
//! Scanner -> validator -> registry for one pass. The pass runs once,
//! synchronously, and either completes or fails as a whole: the registry
//! is only handed out when every discovered type validated.

use crate::catalog::LazyCatalog;
use crate::enable::{find_enabling_declaration, EnablingDeclaration};
use crate::markers::MarkerSet;
use crate::registry::ContractRegistry;
use crate::scan::{NamespaceScanner, ScanRoots};
use crate::validator::MarkerValidator;
use serde::Serialize;
use svcreg_domain::{ArtifactSource, Error, Result};
use tracing::info;

/// Result of a successful pass
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    pub roots: ScanRoots,
    pub registry: ContractRegistry,
    pub summary: DiscoverySummary,
}

/// Counters of a pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoverySummary {
    pub types_scanned: usize,
    pub contracts_registered: usize,
    pub injection_points: usize,
    pub artifacts_skipped: usize,
    /// True if the injection points required the full type catalog
    pub catalog_built: bool,
}

/// Runs discovery over one artifact source
pub struct Discovery<'a> {
    scanner: NamespaceScanner<'a>,
    validator: MarkerValidator,
}

impl<'a> Discovery<'a> {
    pub fn new(source: &'a dyn ArtifactSource) -> Self {
        Self {
            scanner: NamespaceScanner::new(source),
            validator: MarkerValidator::new(),
        }
    }

    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.scanner = self.scanner.with_markers(markers);
        self
    }

    pub fn scanner(&self) -> &NamespaceScanner<'a> {
        &self.scanner
    }

    /// Discover contracts under `roots`
    ///
    /// Empty roots fall back to the enabling declaration.
    pub fn run(&self, roots: &ScanRoots) -> Result<DiscoveryReport> {
        if roots.is_empty() {
            return self.run_enabled();
        }

        let catalog = LazyCatalog::new(&self.scanner);
        let mut registry = ContractRegistry::new();
        let mut summary = DiscoverySummary::default();

        let mut scan = self.scanner.scan(roots)?;
        for descriptor in scan.by_ref() {
            let validated = self.validator.validate(descriptor?, &catalog)?;
            summary.types_scanned += 1;
            summary.injection_points += validated.injection_points.len();
            registry.absorb(&validated);
        }
        summary.artifacts_skipped = scan.skipped();
        summary.contracts_registered = registry.len();
        summary.catalog_built = catalog.is_built();

        info!(
            roots = %roots,
            types = summary.types_scanned,
            contracts = summary.contracts_registered,
            skipped = summary.artifacts_skipped,
            "Contract discovery complete"
        );

        Ok(DiscoveryReport {
            roots: roots.clone(),
            registry,
            summary,
        })
    }

    /// Discover contracts under the roots of the enabling declaration
    pub fn run_enabled(&self) -> Result<DiscoveryReport> {
        let declaration = self.enabling_declaration()?.ok_or_else(|| {
            Error::config(format!(
                "no scan roots given and no #[{}] entry point found",
                self.scanner.markers().enable
            ))
        })?;
        info!(entry_point = %declaration.entry_point, "Using enabling declaration");
        self.run(&declaration.scan_roots())
    }

    pub fn enabling_declaration(&self) -> Result<Option<EnablingDeclaration>> {
        find_enabling_declaration(&self.scanner)
    }
}
