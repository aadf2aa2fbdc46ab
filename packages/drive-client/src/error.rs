//! Error types for the Drive client.

use thiserror::Error;

/// Result type for Drive client operations.
pub type Result<T> = std::result::Result<T, DriveError>;

/// Google Drive client errors.
#[derive(Debug, Error)]
pub enum DriveError {
    /// Configuration error (missing access token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, body read failed)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the Drive API
    #[error("Drive API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}
