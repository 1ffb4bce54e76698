//! Artifact source port
//!
//! Replaces implicit global lookup (a classpath, a module registry) with an
//! explicit capability the scanner is handed, so tests can pass a fake.

use crate::error::Result;
use crate::value_objects::Namespace;
use serde::Serialize;

/// Reference to one readable type-describing unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArtifactRef {
    /// Where the artifact lives (path or synthetic name)
    pub location: String,
    /// Namespace of the artifact's top-level items
    pub namespace: Namespace,
}

impl ArtifactRef {
    pub fn new(location: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            location: location.into(),
            namespace,
        }
    }
}

/// Enumerates and reads artifacts
pub trait ArtifactSource: Send + Sync {
    /// Namespace `crate::` paths resolve against
    fn crate_root(&self) -> Namespace;

    /// Every artifact, sorted by location
    fn list(&self) -> Result<Vec<ArtifactRef>>;

    /// Contents of one artifact
    ///
    /// Failures are reported as `Error::UnreadableArtifact`.
    fn read(&self, artifact: &ArtifactRef) -> Result<String>;
}
