//! AI trait for single-turn text generation.

use async_trait::async_trait;

use crate::error::Result;

/// Generative-text backend.
///
/// Implementations wrap a specific provider and return the model's raw text.
/// Prompting and response parsing live in the pipeline, not here.
#[async_trait]
pub trait AI: Send + Sync {
    /// Send one prompt and return the completion text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
