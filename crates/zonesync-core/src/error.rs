//! Error types for the zonesync system
//!
//! This module defines all error types shared between the model crate and
//! the provider plugins.

use thiserror::Error;

/// Result type alias for zonesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zonesync system
#[derive(Error, Debug)]
pub enum Error {
    /// Zone-level validation errors (bad zone name, unknown zone)
    #[error("invalid zone: {0}")]
    InvalidZone(String),

    /// Record-level validation errors (bad name, unsupported type)
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A record with the same name and type already exists in the zone
    #[error("duplicate record: {0}")]
    DuplicateRecord(String),

    /// A change variant the provider does not know how to apply
    #[error("unsupported change kind: {0}")]
    UnsupportedChange(String),

    /// A submitted change set never left the pending state
    #[error("change set not done after {elapsed_secs} seconds")]
    ApplyTimeout {
        /// Total time spent polling before giving up
        elapsed_secs: u64,
    },

    /// A remote record set of a supported type did not parse into the
    /// expected shape
    #[error("cannot decode {record_type} record set {name}: {reason}")]
    Decode {
        /// Fully-qualified name of the offending record set
        name: String,
        /// Record type as reported by the remote service
        record_type: String,
        /// What went wrong
        reason: String,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors raised by the remote transport
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid-zone error
    pub fn invalid_zone(msg: impl Into<String>) -> Self {
        Self::InvalidZone(msg.into())
    }

    /// Create an invalid-record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a duplicate-record error
    pub fn duplicate_record(msg: impl Into<String>) -> Self {
        Self::DuplicateRecord(msg.into())
    }

    /// Create an unsupported-change error
    pub fn unsupported_change(msg: impl Into<String>) -> Self {
        Self::UnsupportedChange(msg.into())
    }

    /// Create a decode error for one remote record set
    pub fn decode(
        name: impl Into<String>,
        record_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Decode {
            name: name.into(),
            record_type: record_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
