//! Custom error types for loanwiz
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for loanwiz operations
#[derive(Error, Debug)]
pub enum WizardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Field validation errors (recoverable, shown inline next to the field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A numeric value fell outside its schema bounds
    #[error("{field} must be between {min} and {max}, got {value}")]
    SchemaBounds {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Transport-level failures (connection refused, DNS, timeout)
    #[error("Ошибка сети: {0}")]
    Network(String),

    /// The remote endpoint answered with a non-success status
    #[error("Ошибка отправки: {status} {body}")]
    Http { status: u16, body: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl WizardError {
    /// Create a bounds error for a numeric field
    pub fn out_of_bounds(field: &'static str, min: i64, max: i64, value: i64) -> Self {
        Self::SchemaBounds {
            field,
            min,
            max,
            value,
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::SchemaBounds { .. })
    }

    /// Check if this error came from the network or the remote endpoint
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for WizardError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for loanwiz operations
pub type WizardResult<T> = Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WizardError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_bounds_error() {
        let err = WizardError::out_of_bounds("loanAmount", 200, 1000, 199);
        assert_eq!(
            err.to_string(),
            "loanAmount must be between 200 and 1000, got 199"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_network_error_carries_cause() {
        let err = WizardError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Ошибка сети: connection refused");
        assert!(err.is_remote());
    }

    #[test]
    fn test_http_error_message() {
        let err = WizardError::Http {
            status: 500,
            body: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "Ошибка отправки: 500 Internal Server Error");
        assert!(err.is_remote());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wizard_err: WizardError = io_err.into();
        assert!(matches!(wizard_err, WizardError::Io(_)));
    }
}
