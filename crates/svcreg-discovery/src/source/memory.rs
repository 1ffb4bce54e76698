//! In-memory artifact source

use std::collections::BTreeMap;
use svcreg_domain::{ArtifactRef, ArtifactSource, Error, Namespace, Result};

/// Artifacts held in memory, for tests and embedding
///
/// An artifact added with [`MemorySource::with_unreadable`] fails to read,
/// the way a corrupt file would.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    crate_root: Namespace,
    artifacts: BTreeMap<String, (Namespace, Option<String>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace `crate::` paths resolve against (the root by default)
    pub fn with_crate_root(mut self, crate_root: impl Into<Namespace>) -> Self {
        self.crate_root = crate_root.into();
        self
    }

    pub fn with_artifact(
        mut self,
        location: impl Into<String>,
        namespace: impl Into<Namespace>,
        content: impl Into<String>,
    ) -> Self {
        self.artifacts
            .insert(location.into(), (namespace.into(), Some(content.into())));
        self
    }

    pub fn with_unreadable(
        mut self,
        location: impl Into<String>,
        namespace: impl Into<Namespace>,
    ) -> Self {
        self.artifacts
            .insert(location.into(), (namespace.into(), None));
        self
    }
}

impl ArtifactSource for MemorySource {
    fn crate_root(&self) -> Namespace {
        self.crate_root.clone()
    }

    fn list(&self) -> Result<Vec<ArtifactRef>> {
        Ok(self
            .artifacts
            .iter()
            .map(|(location, (namespace, _))| ArtifactRef::new(location.clone(), namespace.clone()))
            .collect())
    }

    fn read(&self, artifact: &ArtifactRef) -> Result<String> {
        match self.artifacts.get(&artifact.location) {
            Some((_, Some(content))) => Ok(content.clone()),
            Some((_, None)) => Err(Error::unreadable_artifact(
                &artifact.location,
                "artifact is not readable",
            )),
            None => Err(Error::unreadable_artifact(
                &artifact.location,
                "no such artifact",
            )),
        }
    }
}
