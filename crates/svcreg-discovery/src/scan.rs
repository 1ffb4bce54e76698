//! Namespace scanner
//!
//! Walks the artifacts of a source and yields the descriptor of every type
//! declared under the requested root namespaces. Artifacts are read and
//! parsed only when the iterator reaches them.

use crate::markers::MarkerSet;
use crate::parser::parse_artifact;
use serde::Serialize;
use std::fmt;
use svcreg_domain::{ArtifactRef, ArtifactSource, ContractIdentity, Namespace, Result, TypeDescriptor};
use tracing::{debug, warn};

/// Root namespaces of one scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanRoots {
    roots: Vec<Namespace>,
}

impl ScanRoots {
    /// Explicit roots; blank entries are dropped
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed: Vec<Namespace> = Vec::new();
        for root in roots {
            let root = root.as_ref();
            if root.trim().is_empty() {
                continue;
            }
            let namespace = Namespace::parse(root);
            if !parsed.contains(&namespace) {
                parsed.push(namespace);
            }
        }
        Self { roots: parsed }
    }

    /// The namespace of `entry_point` and everything below it
    pub fn infer_from(entry_point: &ContractIdentity) -> Self {
        Self {
            roots: vec![entry_point.namespace()],
        }
    }

    /// Explicit roots, or the entry point's namespace when none survive
    pub fn explicit_or_inferred<S: AsRef<str>>(
        explicit: &[S],
        entry_point: &ContractIdentity,
    ) -> Self {
        let roots = Self::new(explicit);
        if roots.is_empty() {
            Self::infer_from(entry_point)
        } else {
            roots
        }
    }

    /// Every namespace
    pub fn all() -> Self {
        Self {
            roots: vec![Namespace::root()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.roots.iter()
    }

    /// True if `namespace` lies under one of the roots
    pub fn covers(&self, namespace: &Namespace) -> bool {
        self.roots.iter().any(|root| root.contains(namespace))
    }

    /// True if an artifact in `namespace` may declare covered types
    ///
    /// Inline modules put types below the artifact's own namespace, so an
    /// artifact above a root still has to be read.
    pub fn may_cover(&self, namespace: &Namespace) -> bool {
        self.roots.iter().any(|root| root.overlaps(namespace))
    }
}

impl fmt::Display for ScanRoots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots: Vec<String> = self.roots.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", roots.join(", "))
    }
}

/// Scans an artifact source for type descriptors
pub struct NamespaceScanner<'a> {
    source: &'a dyn ArtifactSource,
    markers: MarkerSet,
}

impl<'a> NamespaceScanner<'a> {
    pub fn new(source: &'a dyn ArtifactSource) -> Self {
        Self {
            source,
            markers: MarkerSet::default(),
        }
    }

    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Lazily scan every type under `roots`
    ///
    /// Listing the source happens now; reading and parsing happen as the
    /// returned iterator advances. A root matching nothing contributes
    /// nothing.
    pub fn scan(&self, roots: &ScanRoots) -> Result<TypeScan<'_>> {
        let listed = self.source.list()?;
        let pending: Vec<ArtifactRef> = listed
            .into_iter()
            .filter(|artifact| roots.may_cover(&artifact.namespace))
            .collect();

        for root in roots.iter() {
            if !pending.iter().any(|a| root.overlaps(&a.namespace)) {
                debug!(root = %root, "Scan root matched no artifact");
            }
        }

        Ok(TypeScan {
            source: self.source,
            markers: &self.markers,
            crate_root: self.source.crate_root(),
            roots: roots.clone(),
            pending: pending.into_iter(),
            buffered: Vec::new().into_iter(),
            skipped: 0,
        })
    }

    /// Lazily scan every type the source declares
    pub fn scan_all(&self) -> Result<TypeScan<'_>> {
        self.scan(&ScanRoots::all())
    }
}

/// Iterator over the descriptors of one scan pass
///
/// Unreadable artifacts are logged and skipped; a malformed enabling
/// marker surfaces as an `Err` item.
pub struct TypeScan<'s> {
    source: &'s dyn ArtifactSource,
    markers: &'s MarkerSet,
    crate_root: Namespace,
    roots: ScanRoots,
    pending: std::vec::IntoIter<ArtifactRef>,
    buffered: std::vec::IntoIter<TypeDescriptor>,
    skipped: usize,
}

impl TypeScan<'_> {
    /// Artifacts skipped so far because they could not be read or parsed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn load(&self, artifact: &ArtifactRef) -> Result<Vec<TypeDescriptor>> {
        let content = self.source.read(artifact)?;
        parse_artifact(artifact, &content, &self.crate_root, self.markers)
    }
}

impl Iterator for TypeScan<'_> {
    type Item = Result<TypeDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(descriptor) = self.buffered.next() {
                if self.roots.covers(&descriptor.namespace) {
                    return Some(Ok(descriptor));
                }
                continue;
            }

            let artifact = self.pending.next()?;
            match self.load(&artifact) {
                Ok(descriptors) => self.buffered = descriptors.into_iter(),
                Err(e) if e.is_recoverable() => {
                    warn!(artifact = %artifact.location, error = %e, "Skipping unreadable artifact");
                    self.skipped += 1;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
