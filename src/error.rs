//! Error types for the deployment configuration checker.
//!
//! Two kinds of failure live here: input errors that stop the tool before
//! validation starts (unreadable file, malformed line), and field errors that
//! the extractor raises when a value cannot be interpreted. The validator
//! turns field errors into a halting violation instead of propagating them.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for deploycheck.
#[derive(Debug, Error)]
pub enum DeployCheckError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration{}: {message}", at(.location))]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location (`path:line`).
        location: Option<String>,
    },

    /// A required key is absent.
    #[error("{key} must be present in configuration")]
    MissingField {
        /// The missing key.
        key: String,
    },

    /// A key is present but its value has the wrong type.
    #[error("{key} must be {expected}, got '{value}'")]
    InvalidValue {
        /// The offending key.
        key: String,
        /// The value as written in the file.
        value: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },
}

/// Formats an optional location as a ` at ...` suffix.
fn at(location: &Option<String>) -> String {
    location
        .as_deref()
        .map_or_else(String::new, |l| format!(" at {l}"))
}

/// Result type alias for deploycheck operations.
pub type Result<T> = std::result::Result<T, DeployCheckError>;

impl DeployCheckError {
    /// Returns true if the error came from reading or parsing the input file.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Config(ConfigError::FileNotFound { .. } | ConfigError::ParseError { .. })
        )
    }
}

impl ConfigError {
    /// Creates a parse error with an optional location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }

    /// Creates a missing-field error.
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected,
        }
    }

    /// Returns the configuration key this error concerns, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingField { key } | Self::InvalidValue { key, .. } => Some(key),
            Self::FileNotFound { .. } | Self::ParseError { .. } => None,
        }
    }
}
