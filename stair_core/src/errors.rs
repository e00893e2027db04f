//! # Error Types
//!
//! Structured error types for stair_core. Every failure a caller can see,
//! from an out-of-range width to an unreachable calculation service, maps to
//! one variant with enough context to show the user or handle programmatically.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::errors::{StairError, StairResult};
//!
//! fn validate_width(width_mm: f64) -> StairResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(StairError::InvalidInput {
//!             field: "width".to_string(),
//!             value: width_mm.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stair_core operations
pub type StairResult<T> = Result<T, StairError>;

/// Structured error type for staircase operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StairError {
    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Tread material name not recognized
    #[error("Unknown tread material: {name}")]
    UnknownMaterial { name: String },

    /// Frame color code not in the palette
    #[error("Unknown frame color: {name}")]
    UnknownColor { name: String },

    /// No connectivity to the calculation service
    #[error("Calculation service unreachable (offline)")]
    Offline,

    /// The calculation service answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The calculation service answered 2xx but the body has the wrong shape
    #[error("Malformed service response: {reason}")]
    MalformedResponse { reason: String },

    /// Any other transport failure
    #[error("Network error: {reason}")]
    Network { reason: String },

    /// Configuration file could not be read or parsed
    #[error("Config error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// File read/write failure
    #[error("File error during {operation} on '{path}': {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Saved model file written by an incompatible version
    #[error("Model file version {file_version} is incompatible with {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StairError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        StairError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(name: impl Into<String>) -> Self {
        StairError::UnknownMaterial { name: name.into() }
    }

    /// Create an UnknownColor error
    pub fn unknown_color(name: impl Into<String>) -> Self {
        StairError::UnknownColor { name: name.into() }
    }

    /// Create a ServerError
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        StairError::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Create a MalformedResponse error
    pub fn malformed_response(reason: impl Into<String>) -> Self {
        StairError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (the user can retry once back online)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StairError::Offline)
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StairError::InvalidInput { .. } => "INVALID_INPUT",
            StairError::MissingField { .. } => "MISSING_FIELD",
            StairError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            StairError::UnknownColor { .. } => "UNKNOWN_COLOR",
            StairError::Offline => "OFFLINE",
            StairError::ServerError { .. } => "SERVER_ERROR",
            StairError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            StairError::Network { .. } => "NETWORK_ERROR",
            StairError::ConfigError { .. } => "CONFIG_ERROR",
            StairError::FileError { .. } => "FILE_ERROR",
            StairError::VersionMismatch { .. } => "VERSION_MISMATCH",
            StairError::SerializationError { .. } => "SERIALIZATION_ERROR",
            StairError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Text shown to the user in an alert.
    ///
    /// Offline and server failures get their own wording; the server's
    /// message is passed through verbatim. Everything else is prefixed
    /// with a generic "Error:".
    pub fn user_message(&self) -> String {
        match self {
            StairError::Offline => "No internet connection".to_string(),
            StairError::ServerError { message, .. } => message.clone(),
            other => format!("Error: {}", other),
        }
    }
}

impl From<serde_json::Error> for StairError {
    fn from(e: serde_json::Error) -> Self {
        StairError::SerializationError {
            reason: e.to_string(),
        }
    }
}
