//! Assemble the final summary payload.

use super::extract::ExtractedDocuments;
use crate::types::{
    document::DriveFile,
    extraction::ExtractionResult,
    summary::{SummaryCounts, SummaryPayload},
};

/// Combine extraction results into one payload.
///
/// `documents` always holds exactly one budget entry: the extracted budget
/// document, or a "not found" placeholder when the folder had none.
/// `total_files` counts every listed file, not only PDFs.
pub fn aggregate(files: &[DriveFile], extracted: ExtractedDocuments) -> SummaryPayload {
    let ExtractedDocuments { rfi, rfq, budget } = extracted;

    let counts = SummaryCounts {
        total_files: files.len(),
        rfi_count: rfi.len(),
        rfq_count: rfq.len(),
    };

    SummaryPayload {
        documents: vec![budget.unwrap_or_else(ExtractionResult::budget_not_found)],
        rfi,
        rfq,
        counts,
    }
}
