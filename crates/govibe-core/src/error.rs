//! Core error types for govibe-core.
//!
//! Every fallible operation in the library returns one of these enums so
//! callers can tell a validation problem from a transport failure or an
//! unexpected backend response.

use std::path::PathBuf;
use thiserror::Error;

use crate::flow::{FlowEvent, Screen};

/// Core error type for govibe-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Screen flow errors
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// A lookup or submission for the same action is still outstanding
    #[error("{action} is already in progress")]
    Busy { action: String },
}

/// Errors returned by the backend client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an unexpected status code
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// No account exists for the email
    #[error("no user found for {email}")]
    UserNotFound { email: String },

    /// The configured base URL cannot be joined with a path
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home directory could not be determined
    #[error("cannot determine home directory")]
    NoHomeDir,
}

/// Validation errors.
///
/// The `Display` output is the human-readable text shown next to the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field left blank
    #[error("{field} cannot be empty.")]
    Empty { field: &'static str },

    /// Field has a value that breaks its format rule
    #[error("{message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },

    /// Password and its confirmation differ
    #[error("Passwords do not match.")]
    Mismatch,

    /// Invalid value for a non-form parameter
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Empty { field } | ValidationError::Invalid { field, .. } => field,
            ValidationError::Mismatch => "Confirm password",
            ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Screen flow errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("cannot apply {event:?} on screen {from:?}")]
    InvalidTransition { from: Screen, event: FlowEvent },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
