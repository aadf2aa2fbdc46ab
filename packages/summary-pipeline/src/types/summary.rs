//! The summary payload returned to clients.

use serde::{Deserialize, Serialize};

use super::extraction::ExtractionResult;

/// Top-level counts for a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCounts {
    /// Every non-folder file found under the project folder
    pub total_files: usize,
    pub rfi_count: usize,
    pub rfq_count: usize,
}

/// Summary of one project folder.
///
/// Immutable once built; the cache hands out shared references to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    /// Budget section. Always exactly one entry, possibly a placeholder.
    pub documents: Vec<ExtractionResult>,
    pub rfi: Vec<ExtractionResult>,
    pub rfq: Vec<ExtractionResult>,
    pub counts: SummaryCounts,
}
