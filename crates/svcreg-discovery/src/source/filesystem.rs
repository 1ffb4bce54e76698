//! Rust source tree artifact source

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};
use svcreg_domain::{ArtifactRef, ArtifactSource, Error, Namespace, Result};
use tracing::warn;
use walkdir::WalkDir;

/// File names that hold the items of their enclosing module
const MODULE_ROOT_FILES: &[&str] = &["lib", "main", "mod"];

/// Every `.rs` file below a source root, one artifact per file
///
/// Module paths follow the file layout: `lib.rs` and `main.rs` are the
/// crate root, `a/mod.rs` is `a`, `a/b.rs` is `a::b`, all below the
/// configured crate name.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
    crate_root: Namespace,
    excludes: GlobSet,
}

impl FileSystemSource {
    pub fn new(root: impl Into<PathBuf>, crate_name: &str) -> Self {
        Self {
            root: root.into(),
            crate_root: Namespace::parse(&crate_name.replace('-', "_")),
            excludes: GlobSet::empty(),
        }
    }

    /// Skip files whose path relative to the root matches any pattern
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_ref()).map_err(|e| {
                Error::config(format!("invalid exclude pattern {}: {e}", pattern.as_ref()))
            })?;
            builder.add(glob);
        }
        self.excludes = builder
            .build()
            .map_err(|e| Error::config(format!("invalid exclude patterns: {e}")))?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Module path of a file relative to the source root
    pub fn namespace_for(&self, relative: &Path) -> Namespace {
        let mut segments: Vec<String> = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .filter_map(|component| match component {
                Component::Normal(name) => name.to_str().map(str::to_string),
                _ => None,
            })
            .collect();

        let stem = relative.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if !MODULE_ROOT_FILES.contains(&stem) {
            segments.push(stem.to_string());
        }
        self.crate_root.join(&segments)
    }
}

impl ArtifactSource for FileSystemSource {
    fn crate_root(&self) -> Namespace {
        self.crate_root.clone()
    }

    fn list(&self) -> Result<Vec<ArtifactRef>> {
        if !self.root.is_dir() {
            return Err(Error::config(format!(
                "source root {} is not a directory",
                self.root.display()
            )));
        }

        let mut artifacts: Vec<ArtifactRef> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
            .filter_map(|e| {
                let relative = e.path().strip_prefix(&self.root).ok()?.to_path_buf();
                if self.excludes.is_match(&relative) {
                    return None;
                }
                Some(ArtifactRef::new(
                    e.path().display().to_string(),
                    self.namespace_for(&relative),
                ))
            })
            .collect();

        artifacts.sort();
        Ok(artifacts)
    }

    fn read(&self, artifact: &ArtifactRef) -> Result<String> {
        std::fs::read_to_string(&artifact.location)
            .map_err(|e| Error::unreadable_artifact(&artifact.location, e.to_string()))
    }
}
