//! Infrastructure layer constants
//!
//! Domain-level constants (marker names, the stub result) live in
//! `svcreg_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "svcreg.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "svcreg";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SVCREG";

/// Separator between nested keys in environment variable names
/// (`SVCREG_DISCOVERY__SOURCE_ROOT`)
pub const CONFIG_ENV_NESTING: &str = "__";

/// Default directory scanned for Rust sources
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Default crate name; `crate::` paths then resolve to themselves
pub const DEFAULT_CRATE_NAME: &str = "crate";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "SVCREG_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// VALIDATION PATTERNS
// ============================================================================

/// A marker attribute name
pub const MARKER_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// A module path, `::` or `.` separated
pub const MODULE_PATH_PATTERN: &str =
    r"^[A-Za-z_][A-Za-z0-9_]*(?:(?:::|\.)[A-Za-z_][A-Za-z0-9_]*)*$";

/// A cargo package or crate name
pub const CRATE_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_-]*$";
