//! Construction Project Summary Library
//!
//! Turns a Google Drive project folder into a structured summary of its
//! RFIs, RFQs and budget, using a generative model to read each document.
//!
//! # Flow
//!
//! 1. List every file below the folder (cycle-safe, bounded)
//! 2. Fingerprint the listing and consult the cache
//! 3. Classify PDFs by file name into RFI / RFQ / Budget buckets
//! 4. Download, extract text, prompt the model, recover JSON from its reply
//! 5. Aggregate into one [`SummaryPayload`] and cache it
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use summary_pipeline::{PipelineConfig, SummaryService};
//! use summary_pipeline::testing::{MockAI, MockDrive};
//!
//! let service = SummaryService::new(
//!     Arc::new(MockDrive::new()),
//!     Arc::new(MockAI::new()),
//!     PipelineConfig::default(),
//! );
//! let summary = service.summarize("folder-id").await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams to Drive, the model, and text extraction
//! - [`types`] - Files, categories, extraction results, payloads
//! - [`pipeline`] - Listing, classification, extraction, aggregation
//! - [`cache`] - TTL + fingerprint summary cache
//! - [`ai`] / [`drive`] - Google implementations (feature-gated)
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod cache;
pub mod drive;
pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use cache::{SummaryCache, SummaryCacheEntry};
pub use error::{Result, SummaryError};
pub use traits::{ai::AI, drive::DriveSource, text::TextExtractor};
pub use types::{
    config::PipelineConfig,
    document::{fingerprint, Category, CategorySet, ClassifiedDocument, DriveFile},
    extraction::{AiParse, BudgetMetrics, ExtractionResult, ExtractionStatus},
    summary::{SummaryCounts, SummaryPayload},
};

pub use pipeline::{
    aggregate, bucket, classify, classify_files, extract_buckets, list_descendants, parse_ai_json,
    Buckets, DocumentProcessor, ExtractedDocuments, PdfTextExtractor, SummaryService,
};

#[cfg(feature = "gemini")]
pub use ai::GeminiAI;

#[cfg(feature = "google-drive")]
pub use drive::GoogleDrive;
