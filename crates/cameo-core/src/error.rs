//! Error types for the Cameo demo kit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Cameo workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. No variant is fatal to a
/// running conversation: callers surface these as spoken fallback messages
/// rather than crashing the session.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CameoError {
    /// Caller supplied a state field outside the persona's fixed schema
    #[error("Unknown field '{field}' for the {domain} schema")]
    UnknownField { domain: String, field: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system reads, directory creation)
    #[error("IO error: {message}")]
    Io { message: String },

    /// The archive or catalog rewrite could not complete
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// An existing archive/catalog file does not parse as the expected shape
    #[error("Stored data is corrupt: {path}: {message}")]
    CorruptData { path: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A guarded transition of the verification flow was violated
    #[error("{0}")]
    FlowViolation(String),

    /// A persona handoff outside the transition table
    #[error("Handoff not allowed: {from} -> {to}")]
    HandoffRejected { from: String, to: String },

    /// A tool call carried missing or mistyped arguments
    #[error("Invalid argument for '{tool}': {message}")]
    InvalidArgument { tool: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CameoError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownField error
    pub fn unknown_field(domain: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            domain: domain.into(),
            field: field.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a StorageWrite error
    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::StorageWrite(message.into())
    }

    /// Creates a CorruptData error
    pub fn corrupt_data(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptData {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a FlowViolation error
    pub fn flow(message: impl Into<String>) -> Self {
        Self::FlowViolation(message.into())
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an UnknownField error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Check if this error came from the storage layer.
    ///
    /// Returns true for write failures, corrupt files, and plain IO errors.
    /// Callers use this to tell the user their data was not saved instead of
    /// pretending the operation succeeded.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageWrite(_) | Self::CorruptData { .. } | Self::Io { .. }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CameoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CameoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CameoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CameoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CameoError>`.
pub type Result<T> = std::result::Result<T, CameoError>;
