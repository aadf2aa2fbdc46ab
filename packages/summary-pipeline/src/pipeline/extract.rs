//! Per-document extraction: download → text → AI → parsed result.
//!
//! Every document is its own failure domain. Download, extraction and AI
//! errors (timeouts included) are logged and downgraded to a placeholder
//! result; they never abort the batch. A document is read once even when
//! it is extracted for several categories.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::classify::Buckets;
use super::parse::parse_ai_json;
use super::pdf::truncate_chars;
use super::prompts::{format_budget_prompt, format_correspondence_prompt};
use super::with_timeout;
use crate::error::{Result, SummaryError};
use crate::traits::{ai::AI, drive::DriveSource, text::TextExtractor};
use crate::types::{
    config::PipelineConfig,
    document::{Category, CategorySet, ClassifiedDocument, DriveFile},
    extraction::ExtractionResult,
};

/// Runs the download/extract/AI steps for single documents.
#[derive(Clone)]
pub struct DocumentProcessor {
    drive: Arc<dyn DriveSource>,
    ai: Arc<dyn AI>,
    text: Arc<dyn TextExtractor>,
    config: PipelineConfig,
}

impl DocumentProcessor {
    pub fn new(
        drive: Arc<dyn DriveSource>,
        ai: Arc<dyn AI>,
        text: Arc<dyn TextExtractor>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            drive,
            ai,
            text,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extract an RFI or RFQ document.
    pub async fn correspondence(&self, file: &DriveFile, category: Category) -> ExtractionResult {
        self.single(file, category).await
    }

    /// Extract a budget document.
    pub async fn budget(&self, file: &DriveFile) -> ExtractionResult {
        self.single(file, Category::Budget).await
    }

    async fn single(&self, file: &DriveFile, category: Category) -> ExtractionResult {
        let document = ClassifiedDocument::new(file.clone(), CategorySet::new().with(category));
        self.process(document)
            .await
            .into_iter()
            .next()
            .unwrap_or_else(|| ExtractionResult::failed(&file.name, category))
    }

    /// Read a document once, then extract it for each of its categories
    /// in classification order. A failed read yields one `failed`
    /// placeholder per category.
    pub async fn process(&self, mut document: ClassifiedDocument) -> Vec<ExtractionResult> {
        let categories: Vec<Category> = document
            .categories
            .categories()
            .into_iter()
            .filter(|c| *c != Category::Other)
            .collect();

        if let Err(e) = self.read(&mut document).await {
            warn!(file = %document.file.name, error = %e, "Document read failed");
            return categories
                .into_iter()
                .map(|category| ExtractionResult::failed(&document.file.name, category))
                .collect();
        }

        let mut results = Vec::with_capacity(categories.len());
        for category in categories {
            results.push(self.extract(&document, category).await);
        }
        results
    }

    /// Attach the document's text unless it is already present.
    pub async fn read(&self, document: &mut ClassifiedDocument) -> Result<()> {
        if document.extracted_text.is_none() {
            document.extracted_text = Some(self.document_text(&document.file).await?);
        }
        Ok(())
    }

    /// Run the model over a document that has been read.
    pub async fn extract(&self, document: &ClassifiedDocument, category: Category) -> ExtractionResult {
        match self.try_extract(document, category).await {
            Ok(result) => result,
            Err(e) => {
                warn!(file = %document.file.name, category = %category, error = %e, "Document extraction failed");
                ExtractionResult::failed(&document.file.name, category)
            }
        }
    }

    async fn try_extract(&self, document: &ClassifiedDocument, category: Category) -> Result<ExtractionResult> {
        let name = document.file.name.as_str();
        let text = document.extracted_text.as_deref().unwrap_or_default();
        if text.is_empty() {
            return Ok(ExtractionResult::no_text(name, category));
        }

        let result = match category {
            Category::Budget => {
                let raw = self.generate(&format_budget_prompt(name, text)).await?;
                ExtractionResult::from_budget(name, parse_ai_json(&raw))
            }
            _ => {
                let raw = self
                    .generate(&format_correspondence_prompt(category, name, text))
                    .await?;
                ExtractionResult::from_correspondence(name, category, parse_ai_json(&raw))
            }
        };
        Ok(result)
    }

    /// Download and convert a document, capped at `max_text_chars`.
    async fn document_text(&self, file: &DriveFile) -> Result<String> {
        let bytes = with_timeout(
            "file download",
            self.config.call_timeout,
            self.drive.download(&file.id),
        )
        .await?;

        let extractor = self.text.clone();
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
            .await
            .map_err(|e| SummaryError::Extraction(e.to_string()))?;

        debug!(file = %file.name, chars = text.len(), "Extracted document text");
        Ok(truncate_chars(text.trim(), self.config.max_text_chars).to_string())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        with_timeout("AI generation", self.config.call_timeout, self.ai.generate(prompt)).await
    }
}

/// Results of the extraction stage, in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDocuments {
    pub rfi: Vec<ExtractionResult>,
    pub rfq: Vec<ExtractionResult>,
    pub budget: Option<ExtractionResult>,
}

/// One owned document per distinct file, carrying every category it must
/// be extracted for. Only the latest budget file gets the budget category.
fn plan(buckets: &Buckets) -> Vec<ClassifiedDocument> {
    let mut documents: Vec<ClassifiedDocument> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    let work = buckets
        .rfi
        .iter()
        .map(|f| (f, Category::Rfi))
        .chain(buckets.rfq.iter().map(|f| (f, Category::Rfq)))
        .chain(buckets.latest_budget().map(|f| (f, Category::Budget)));

    for (file, category) in work {
        match index.get(file.id.as_str()) {
            Some(&i) => documents[i].categories.insert(category),
            None => {
                index.insert(file.id.as_str(), documents.len());
                documents.push(ClassifiedDocument::new(
                    file.clone(),
                    CategorySet::new().with(category),
                ));
            }
        }
    }
    documents
}

/// Extract every bucketed document with bounded concurrency.
///
/// Documents share one pool of `concurrency` slots. Output order follows
/// the buckets regardless of completion order.
pub async fn extract_buckets(processor: &DocumentProcessor, buckets: &Buckets) -> ExtractedDocuments {
    let documents = plan(buckets);
    let ids: Vec<String> = documents.iter().map(|d| d.file.id.clone()).collect();

    let results: Vec<Vec<ExtractionResult>> = stream::iter(documents)
        .map(|document| processor.process(document))
        .buffered(processor.config.concurrency.max(1))
        .collect()
        .await;

    let mut by_file: HashMap<(String, Category), ExtractionResult> = HashMap::new();
    for (id, file_results) in ids.into_iter().zip(results) {
        for result in file_results {
            by_file.insert((id.clone(), result.category), result);
        }
    }

    let pick = |files: &[DriveFile], category: Category| -> Vec<ExtractionResult> {
        files
            .iter()
            .filter_map(|f| by_file.get(&(f.id.clone(), category)).cloned())
            .collect()
    };

    ExtractedDocuments {
        rfi: pick(&buckets.rfi, Category::Rfi),
        rfq: pick(&buckets.rfq, Category::Rfq),
        budget: buckets
            .latest_budget()
            .and_then(|f| by_file.get(&(f.id.clone(), Category::Budget)).cloned()),
    }
}
