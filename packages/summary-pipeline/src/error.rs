//! Typed errors for the summary pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while building a project summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Drive listing or download failed
    #[error("drive error: {0}")]
    Drive(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An external call did not finish in time
    #[error("{operation} timed out after {limit:?}")]
    Timeout { operation: String, limit: Duration },

    /// Folder traversal visited more folders than allowed
    #[error("folder traversal exceeded {limit} folders")]
    TraversalLimit { limit: usize },

    /// Text extraction task failed to complete
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SummaryError {
    /// Whether this error came from a timeout guard.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, SummaryError>;
