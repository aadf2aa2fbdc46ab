//! The summary service: list → fingerprint → cache → extract → aggregate.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::aggregate::aggregate;
use super::classify::{bucket, classify_files};
use super::extract::{extract_buckets, DocumentProcessor};
use super::list::list_descendants;
use super::pdf::PdfTextExtractor;
use crate::cache::SummaryCache;
use crate::error::Result;
use crate::traits::{ai::AI, drive::DriveSource, text::TextExtractor};
use crate::types::{
    config::PipelineConfig,
    document::{fingerprint, DriveFile},
    summary::SummaryPayload,
};

/// Builds and caches project summaries.
///
/// Cheap to share behind an `Arc`; all state lives in the cache.
pub struct SummaryService {
    drive: Arc<dyn DriveSource>,
    processor: DocumentProcessor,
    cache: Arc<SummaryCache>,
    config: PipelineConfig,
}

impl SummaryService {
    /// Create a service that extracts text with [`PdfTextExtractor`].
    pub fn new(drive: Arc<dyn DriveSource>, ai: Arc<dyn AI>, config: PipelineConfig) -> Self {
        Self::with_text_extractor(drive, ai, Arc::new(PdfTextExtractor::new()), config)
    }

    /// Create a service with a custom text extractor.
    pub fn with_text_extractor(
        drive: Arc<dyn DriveSource>,
        ai: Arc<dyn AI>,
        text: Arc<dyn TextExtractor>,
        config: PipelineConfig,
    ) -> Self {
        let cache = Arc::new(SummaryCache::new(config.cache_ttl));
        let processor = DocumentProcessor::new(drive.clone(), ai, text, config.clone());
        Self {
            drive,
            processor,
            cache,
            config,
        }
    }

    /// Share an existing cache.
    pub fn with_cache(mut self, cache: Arc<SummaryCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Every non-folder file below a folder.
    pub async fn list_files(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        list_descendants(self.drive.as_ref(), folder_id, &self.config).await
    }

    /// Summarize a folder, serving a fresh cached payload when possible.
    pub async fn summarize(&self, folder_id: &str) -> Result<Arc<SummaryPayload>> {
        self.summarize_with(folder_id, false).await
    }

    /// Summarize a folder, optionally bypassing the cache lookup.
    ///
    /// The listing always runs: its fingerprint decides whether a cached
    /// payload is still valid. Only listing errors are returned; failures
    /// on individual documents become placeholder entries.
    pub async fn summarize_with(&self, folder_id: &str, force_refresh: bool) -> Result<Arc<SummaryPayload>> {
        let started = Instant::now();
        let files = self.list_files(folder_id).await?;
        let fingerprint = fingerprint(&files);

        if !force_refresh {
            if let Some(payload) = self.cache.get(folder_id, &fingerprint).await {
                info!(folder_id = %folder_id, files = files.len(), "Serving cached summary");
                return Ok(payload);
            }
        }

        let buckets = bucket(&classify_files(&files));
        debug!(
            folder_id = %folder_id,
            rfi = buckets.rfi.len(),
            rfq = buckets.rfq.len(),
            budget = buckets.budget.len(),
            "Classified documents"
        );

        let extracted = extract_buckets(&self.processor, &buckets).await;
        let payload = Arc::new(aggregate(&files, extracted));
        self.cache.put(folder_id, &fingerprint, payload.clone()).await;

        info!(
            folder_id = %folder_id,
            total_files = payload.counts.total_files,
            rfi = payload.counts.rfi_count,
            rfq = payload.counts.rfq_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Summary built"
        );

        Ok(payload)
    }
}
