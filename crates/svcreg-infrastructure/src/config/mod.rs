//! Configuration
//!
//! Defaults, then `svcreg.toml`, then `SVCREG_`-prefixed environment
//! variables, merged with Figment and validated before use.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DiscoveryConfig, LoggingConfig, MarkerConfig};
