//! Summary pipeline - the core of the library.
//!
//! A summary request moves through:
//! - Listing (recursive folder enumeration)
//! - Classification (file-name patterns into RFI / RFQ / Budget buckets)
//! - Extraction (download → PDF text → AI → best-effort JSON recovery)
//! - Aggregation (one payload with counts)
//! - Caching (per folder, keyed on the listing fingerprint)

pub mod aggregate;
pub mod classify;
pub mod extract;
pub mod list;
pub mod parse;
pub mod pdf;
pub mod prompts;
pub mod service;

use std::future::Future;
use std::time::Duration;

use crate::error::{Result, SummaryError};

pub use aggregate::aggregate;
pub use classify::{bucket, classify, classify_files, Buckets};
pub use extract::{extract_buckets, DocumentProcessor, ExtractedDocuments};
pub use list::list_descendants;
pub use parse::{first_json_object, parse_ai_json, strip_code_fences};
pub use pdf::{truncate_chars, PdfTextExtractor, MAX_RUN_CHARS};
pub use prompts::{format_budget_prompt, format_correspondence_prompt, BUDGET_PROMPT, CORRESPONDENCE_PROMPT};
pub use service::SummaryService;

/// Run an external call under a time limit. Elapsed limits become
/// [`SummaryError::Timeout`] so callers treat them like any other failure.
pub(crate) async fn with_timeout<T, F>(operation: &str, limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(SummaryError::Timeout {
            operation: operation.to_string(),
            limit,
        }),
    }
}
