//! PDF text extraction with a lenient fallback.
//!
//! The strict path hands the whole document to `pdf-extract`. That parser
//! rejects (and occasionally panics on) malformed token streams, so on any
//! failure the lenient path walks each page's content stream with `lopdf`
//! and keeps only the literal strings of text-showing operators.

use std::panic::{self, AssertUnwindSafe};

use lopdf::{Document, Object};
use tracing::debug;

use crate::traits::text::TextExtractor;

/// Longest text run kept by the lenient path.
pub const MAX_RUN_CHARS: usize = 128;

/// Production [`TextExtractor`] for PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8]) -> String {
        match extract_strict(data) {
            Ok(text) => text,
            Err(reason) => {
                debug!(reason = %reason, bytes = data.len(), "Strict PDF parse failed, using lenient extraction");
                extract_lenient(data)
            }
        }
    }
}

fn extract_strict(data: &[u8]) -> Result<String, String> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(format!("{:?}", e)),
        Err(_) => Err("parser panicked".to_string()),
    }
}

/// Per-page extraction that never fails. Returns an empty string when the
/// document cannot be loaded at all.
pub fn extract_lenient(data: &[u8]) -> String {
    panic::catch_unwind(AssertUnwindSafe(|| lenient_pages(data))).unwrap_or_default()
}

fn lenient_pages(data: &[u8]) -> String {
    let doc = match Document::load_mem(data) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(error = %e, "Lenient PDF load failed");
            return String::new();
        }
    };

    let mut pages = Vec::new();
    for (page_number, page_id) in doc.get_pages() {
        let content = match doc.get_and_decode_page_content(page_id) {
            Ok(content) => content,
            Err(e) => {
                debug!(page_number, error = %e, "Skipping undecodable page");
                continue;
            }
        };

        let mut runs: Vec<String> = Vec::new();
        for op in &content.operations {
            let operand = match op.operator.as_str() {
                "Tj" | "'" => op.operands.last(),
                "\"" => op.operands.get(2),
                "TJ" => op.operands.first(),
                _ => None,
            };
            if let Some(run) = operand.and_then(text_run) {
                runs.push(run);
            }
        }

        let page_text = runs.join(" ");
        if !page_text.trim().is_empty() {
            pages.push(page_text);
        }
    }

    pages.join("\n")
}

/// Decode one text-showing operand into a run, capped at [`MAX_RUN_CHARS`].
/// `TJ` arrays interleave strings with kerning numbers; only strings count.
fn text_run(operand: &Object) -> Option<String> {
    let raw = match operand {
        Object::String(bytes, _) => decode_bytes(bytes),
        Object::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Object::String(bytes, _) => Some(decode_bytes(bytes)),
                _ => None,
            })
            .collect::<String>(),
        _ => return None,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(truncate_chars(trimmed, MAX_RUN_CHARS).to_string())
}

/// Single-byte decoding; control characters are dropped.
fn decode_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| b as char)
        .filter(|c| !c.is_control())
        .collect()
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
