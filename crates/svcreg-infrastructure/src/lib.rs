//! Infrastructure layer for svcreg
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`factory`] | Stub proxy factory |
//! | [`emitter`] | Registration records and publishing |
//! | [`container`] | Lazy singleton container |
//! | [`config`] | Figment configuration with validation |
//! | [`logging`] | Structured logging with tracing |
//! | [`constants`] | Configuration and logging constants |

pub mod config;
pub mod constants;
pub mod container;
pub mod emitter;
pub mod error_ext;
pub mod factory;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, DiscoveryConfig, LoggingConfig, MarkerConfig};
pub use container::ProxyContainer;
pub use emitter::{PublishOutcome, ResolutionEmitter};
pub use error_ext::ErrorContext;
pub use factory::StubProxyFactory;
pub use logging::init_logging;
