//! Pipeline configuration.

use std::time::Duration;

/// Tunables for the summary pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Documents processed in parallel during extraction
    pub concurrency: usize,

    /// Limit applied to every external call (listing, download, AI)
    pub call_timeout: Duration,

    /// Maximum folders visited in one traversal
    pub max_folders: usize,

    /// Characters of document text sent to the model
    pub max_text_chars: usize,

    /// How long a cached summary stays valid
    pub cache_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            call_timeout: Duration::from_secs(30),
            max_folders: 5_000,
            max_text_chars: 30_000,
            cache_ttl: Duration::from_secs(600),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction concurrency (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_folders(mut self, max_folders: usize) -> Self {
        self.max_folders = max_folders;
        self
    }

    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}
