//! Document text extraction trait.

/// Converts document bytes into plain text.
///
/// Extraction is synchronous and may be CPU-heavy; the pipeline runs it on
/// the blocking thread pool. Implementations must not fail: unrecoverable
/// input yields an empty string.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, data: &[u8]) -> String;
}
