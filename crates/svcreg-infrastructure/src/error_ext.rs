//! Error extension utilities
//!
//! Context helpers turning foreign errors into the domain `Error`.

use std::fmt;
use svcreg_domain::{Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use svcreg_infrastructure::error_ext::ErrorContext;
///
/// let content = std::fs::read_to_string(&path)
///     .io_context(format!("Failed to read {}", path.display()))?;
///
/// let config: AppConfig = figment.extract().context("Failed to extract configuration")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context, reporting the failure as a configuration error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Add context with lazy evaluation for expensive context creation
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Add context for I/O operations
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::config(format!("{context}: {err}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|err| Error::config(format!("{}: {err}", f())))
    }

    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::Io {
            source: std::io::Error::other(format!("{context}: {err}")),
        })
    }
}
