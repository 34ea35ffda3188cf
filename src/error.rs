//! Error types and handling for Billwatch
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Billwatch operations
pub type Result<T> = std::result::Result<T, BillwatchError>;

/// Main error type for Billwatch
#[derive(Debug, Error)]
pub enum BillwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Network-related errors (transport faults talking to the portal)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Portal API errors (unexpected status or body)
    #[error("Portal error: {message}")]
    Portal { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl BillwatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        BillwatchError::Config {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        BillwatchError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        BillwatchError::Network {
            message: message.into(),
        }
    }

    /// Create a new portal error
    pub fn portal<S: Into<String>>(message: S) -> Self {
        BillwatchError::Portal {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        BillwatchError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        BillwatchError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        BillwatchError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for BillwatchError {
    fn from(err: std::io::Error) -> Self {
        BillwatchError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for BillwatchError {
    fn from(err: serde_yaml::Error) -> Self {
        BillwatchError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BillwatchError {
    fn from(err: serde_json::Error) -> Self {
        BillwatchError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BillwatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BillwatchError::timeout(err.to_string())
        } else {
            BillwatchError::network(err.to_string())
        }
    }
}
