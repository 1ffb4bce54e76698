//! Configuration types

use crate::constants::{DEFAULT_CRATE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_SOURCE_ROOT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use svcreg_discovery::{MarkerSet, ScanRoots};

/// Marker attribute names; the same shape the scanner consumes
pub type MarkerConfig = MarkerSet;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to scan and how to recognize markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory holding the crate's `.rs` files
    pub source_root: PathBuf,

    /// Crate name the source root's modules live under
    pub crate_name: String,

    /// Root namespaces; empty means "use the enabling declaration"
    pub roots: Vec<String>,

    /// Glob patterns, relative to `source_root`, of files to skip
    pub exclude: Vec<String>,

    pub markers: MarkerConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            crate_name: DEFAULT_CRATE_NAME.to_string(),
            roots: Vec::new(),
            exclude: Vec::new(),
            markers: MarkerConfig::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Configured roots with blank entries dropped
    pub fn scan_roots(&self) -> ScanRoots {
        ScanRoots::new(&self.roots)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Include source file and line in each event
    pub with_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            with_location: false,
        }
    }
}
