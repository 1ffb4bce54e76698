//! Domain constants
//!
//! Marker names, the stub dispatch result and namespace syntax shared by
//! every layer.

// ============================================================================
// MARKER CONSTANTS
// ============================================================================

/// Attribute marking a trait as a registrable contract
pub const CONTRACT_MARKER: &str = "contract";

/// Attribute marking a field for resolution through the registry
pub const INJECT_MARKER: &str = "inject";

/// Attribute marking the entry point that enables contract scanning
pub const ENABLE_MARKER: &str = "enable_contracts";

/// Argument of the enabling attribute listing explicit scan roots
pub const ENABLE_ROOTS_ARGUMENT: &str = "roots";

// ============================================================================
// DISPATCH CONSTANTS
// ============================================================================

/// Result returned by every stub proxy method, for any arguments
pub const STUB_INVOCATION_RESULT: &str =
    "stub invocation result: hello, world! (no remote implementation wired)";

// ============================================================================
// NAMESPACE CONSTANTS
// ============================================================================

/// Canonical namespace separator
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Alternate separator accepted when parsing configured roots
pub const NAMESPACE_ALT_SEPARATOR: char = '.';

/// First segment of a crate-relative path
pub const CRATE_SEGMENT: &str = "crate";

/// First segment of a module-relative path
pub const SELF_SEGMENT: &str = "self";

/// Segment naming the parent module
pub const SUPER_SEGMENT: &str = "super";

/// Smart pointers and wrappers peeled off a field type before resolution
pub const TRANSPARENT_WRAPPERS: &[&str] = &["Arc", "Rc", "Box"];

/// Trait bounds ignored when resolving a `dyn` field type
pub const AUTO_TRAIT_BOUNDS: &[&str] = &["Send", "Sync", "Unpin"];
