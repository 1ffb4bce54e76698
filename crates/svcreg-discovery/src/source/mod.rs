//! Artifact sources
//!
//! Implementations of the `ArtifactSource` port.

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemSource;
pub use memory::MemorySource;
