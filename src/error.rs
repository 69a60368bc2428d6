//! Error types for the administration core.

use crate::predicate::RowId;
use thiserror::Error;

/// Errors raised while talking to the admin server or loading configuration.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete (connection, timeout, HTTP status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with `success: false`.
    #[error("Remote rejected request: {0}")]
    Remote(String),

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Soft failures are reported by the server; everything else is local or transport.
    pub fn is_soft(&self) -> bool {
        matches!(self, ApiError::Remote(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Errors raised by the predicate row editor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Row not found: {0}")]
    RowNotFound(RowId),

    #[error("Row {0} has been destroyed")]
    RowDestroyed(RowId),

    #[error("Invalid validation pattern for property '{property}': {reason}")]
    InvalidPattern { property: String, reason: String },
}
