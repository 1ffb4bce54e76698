//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for svcreg
#[derive(Error, Debug)]
pub enum Error {
    /// A contract marker sits on something that is not a pure interface,
    /// or the proxy factory was asked to proxy one
    #[error("Invalid contract shape: {contract} {reason}")]
    InvalidContractShape {
        /// Qualified name of the offending type
        contract: String,
        /// Why the type cannot be proxied
        reason: String,
    },

    /// An inject marker sits on a static field or a field whose declared
    /// type is not a pure interface
    #[error("Invalid injection target: {owner}::{field} {reason}")]
    InvalidInjectionTarget {
        /// Qualified name of the type owning the field
        owner: String,
        /// Field name
        field: String,
        /// Why the field cannot be injected
        reason: String,
    },

    /// A scanned artifact could not be read or parsed
    #[error("Unreadable artifact {artifact}: {message}")]
    UnreadableArtifact {
        /// Artifact location
        artifact: String,
        /// Read or parse failure
        message: String,
    },

    /// The container holds no registration for the requested contract
    #[error("Contract not registered: {contract}")]
    NotRegistered {
        /// Qualified name of the contract
        contract: String,
    },

    /// A method outside the contract surface was invoked on a proxy
    #[error("Unknown method {method} on contract {contract}")]
    UnknownMethod {
        /// Qualified name of the contract
        contract: String,
        /// Requested method name
        method: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an invalid contract shape error
    pub fn invalid_contract_shape<C: Into<String>, R: Into<String>>(contract: C, reason: R) -> Self {
        Self::InvalidContractShape {
            contract: contract.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid injection target error
    pub fn invalid_injection_target<O, F, R>(owner: O, field: F, reason: R) -> Self
    where
        O: Into<String>,
        F: Into<String>,
        R: Into<String>,
    {
        Self::InvalidInjectionTarget {
            owner: owner.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unreadable artifact error
    pub fn unreadable_artifact<A: Into<String>, M: Into<String>>(artifact: A, message: M) -> Self {
        Self::UnreadableArtifact {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    /// Create a not registered error
    pub fn not_registered<S: Into<String>>(contract: S) -> Self {
        Self::NotRegistered {
            contract: contract.into(),
        }
    }

    /// Create an unknown method error
    pub fn unknown_method<C: Into<String>, M: Into<String>>(contract: C, method: M) -> Self {
        Self::UnknownMethod {
            contract: contract.into(),
            method: method.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for structural violations that must abort startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidContractShape { .. } | Self::InvalidInjectionTarget { .. }
        )
    }

    /// True for failures the scanner recovers from by skipping the artifact
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnreadableArtifact { .. })
    }
}
