//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types. The
//! source client has its own sub-enum so callers can tell a transport
//! failure apart from an empty-but-ok response.

use thiserror::Error;

/// Main Larder error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum LarderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Recipe source errors
    #[error("Recipe source error: {0}")]
    Source(#[from] SourceError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Recipe-source-specific errors
///
/// Errors that occur when querying the external recipe catalog. These
/// don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to connect to the catalog service
    #[error("Failed to connect to recipe source: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Invalid response from recipe source: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for LarderError {
    fn from(err: std::io::Error) -> Self {
        LarderError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LarderError {
    fn from(err: serde_json::Error) -> Self {
        LarderError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LarderError {
    fn from(err: toml::de::Error) -> Self {
        LarderError::Configuration(format!("TOML parse error: {err}"))
    }
}
