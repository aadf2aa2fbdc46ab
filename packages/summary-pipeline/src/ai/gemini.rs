//! Vertex AI Gemini implementation of the AI trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use summary_pipeline::ai::GeminiAI;
//!
//! let ai = GeminiAI::from_env()?.with_model("gemini-1.5-pro");
//! ```

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateRequest};

use crate::error::{Result, SummaryError};
use crate::traits::ai::AI;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini-backed text generation.
#[derive(Clone)]
pub struct GeminiAI {
    client: GeminiClient,
    model: String,
    temperature: f32,
}

impl GeminiAI {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
        }
    }

    /// Create from the Vertex environment variables.
    pub fn from_env() -> Result<Self> {
        let client = GeminiClient::from_env().map_err(|e| SummaryError::Config(Box::new(e)))?;
        Ok(Self::new(client))
    }

    /// Set the model (default: gemini-1.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AI for GeminiAI {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::new(&self.model)
            .user(prompt)
            .temperature(self.temperature);

        let response = self
            .client
            .generate_content(request)
            .await
            .map_err(|e| SummaryError::AI(Box::new(e)))?;

        Ok(response.text)
    }
}
