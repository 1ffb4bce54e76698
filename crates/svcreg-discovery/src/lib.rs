//! Contract discovery for svcreg
//!
//! Static scanning of Rust source for contract-marked traits and
//! inject-marked fields, marker placement validation and registry
//! population.
//!
//! ```ignore
//! use svcreg_discovery::{Discovery, FileSystemSource, ScanRoots};
//!
//! let source = FileSystemSource::new("app/src", "app");
//! let report = Discovery::new(&source).run(&ScanRoots::new(["app::service"]))?;
//! for entry in report.registry.entries() {
//!     println!("{}", entry.contract);
//! }
//! ```

pub mod catalog;
pub mod enable;
pub mod markers;
pub mod parser;
pub mod pipeline;
pub mod registry;
pub mod scan;
pub mod source;
pub mod validator;

pub use catalog::{LazyCatalog, TypeCatalog, TypeResolver};
pub use enable::{find_enabling_declaration, EnablingDeclaration};
pub use markers::MarkerSet;
pub use parser::parse_artifact;
pub use pipeline::{Discovery, DiscoveryReport, DiscoverySummary};
pub use registry::ContractRegistry;
pub use scan::{NamespaceScanner, ScanRoots, TypeScan};
pub use source::{FileSystemSource, MemorySource};
pub use validator::{InjectionPoint, MarkerValidator, ValidatedType};
