//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Cloak error type
///
/// This is the primary error type used throughout the pipeline. Each
/// variant carries a plain message so callers can surface errors
/// without depending on the failing layer's internals.
#[derive(Debug, Error)]
pub enum CloakError {
    /// Settings, pattern catalogs, or replacement files that cannot be
    /// read or parsed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Replacement data that parsed but breaks an invariant
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// Recognizer failures while scanning a document
    #[error("Detection error: {0}")]
    Detection(String),

    /// Input files with an extension the pipeline does not handle
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CloakError {
    fn from(err: std::io::Error) -> Self {
        CloakError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CloakError {
    fn from(err: serde_json::Error) -> Self {
        CloakError::Serialization(err.to_string())
    }
}

// Conversion from serde_yaml::Error
impl From<serde_yaml::Error> for CloakError {
    fn from(err: serde_yaml::Error) -> Self {
        CloakError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CloakError {
    fn from(err: toml::de::Error) -> Self {
        CloakError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from regex compile errors
impl From<regex::Error> for CloakError {
    fn from(err: regex::Error) -> Self {
        CloakError::Configuration(format!("Invalid pattern: {err}"))
    }
}
