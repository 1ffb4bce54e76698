//! Module-path namespaces

use crate::constants::{NAMESPACE_ALT_SEPARATOR, NAMESPACE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Rust module path such as `com::example::app`
///
/// The empty namespace is the root and contains every other namespace.
/// Containment is segment-wise: `com::example::app` contains
/// `com::example::app::svc` but not `com::example::application`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// The root namespace
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a namespace, accepting `::` or `.` as separators
    ///
    /// Blank segments are dropped, so `""` parses to the root.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split(NAMESPACE_SEPARATOR)
            .flat_map(|part| part.split(NAMESPACE_ALT_SEPARATOR))
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    /// Build a namespace from already split segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Namespace one level below this one
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append several segments
    pub fn join<S: AsRef<str>>(&self, tail: &[S]) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(tail.iter().map(|s| s.as_ref().to_string()));
        Self { segments }
    }

    /// Enclosing namespace, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// True if `other` is this namespace or one of its descendants
    pub fn contains(&self, other: &Namespace) -> bool {
        other.segments.len() >= self.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    /// True if either namespace contains the other
    pub fn overlaps(&self, other: &Namespace) -> bool {
        self.contains(other) || other.contains(self)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(NAMESPACE_SEPARATOR))
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for Namespace {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<Namespace> for String {
    fn from(namespace: Namespace) -> Self {
        namespace.to_string()
    }
}
