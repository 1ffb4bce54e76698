//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_NESTING, CONFIG_ENV_PREFIX, CRATE_NAME_PATTERN, DEFAULT_CONFIG_DIR,
    DEFAULT_CONFIG_FILENAME, MARKER_NAME_PATTERN, MODULE_PATH_PATTERN,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use svcreg_domain::{Error, Result};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `SVCREG_LOGGING__LEVEL`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore nests keys, single underscores stay in field names
        figment = figment
            .merge(Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_NESTING));

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| Error::config(format!("Failed to extract configuration: {e}")))?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;
        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_discovery_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_discovery_config(config: &AppConfig) -> Result<()> {
    let discovery = &config.discovery;

    let crate_name = compile(CRATE_NAME_PATTERN)?;
    if !crate_name.is_match(&discovery.crate_name) {
        return Err(Error::config(format!(
            "Invalid crate name: {:?}",
            discovery.crate_name
        )));
    }

    let module_path = compile(MODULE_PATH_PATTERN)?;
    for root in &discovery.roots {
        // Blank roots are dropped when scanning
        if !root.trim().is_empty() && !module_path.is_match(root.trim()) {
            return Err(Error::config(format!("Invalid scan root: {root:?}")));
        }
    }

    let marker_name = compile(MARKER_NAME_PATTERN)?;
    let markers = &discovery.markers;
    for (role, name) in [
        ("contract", &markers.contract),
        ("inject", &markers.inject),
        ("enable", &markers.enable),
    ] {
        if !marker_name.is_match(name) {
            return Err(Error::config(format!(
                "Invalid {role} marker name: {name:?}"
            )));
        }
    }
    if markers.contract == markers.inject
        || markers.contract == markers.enable
        || markers.inject == markers.enable
    {
        return Err(Error::config("Marker names must be distinct"));
    }

    Ok(())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::config(format!("Invalid pattern {pattern}: {e}")))
}
