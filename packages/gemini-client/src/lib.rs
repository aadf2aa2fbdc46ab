//! Pure Vertex AI Gemini REST client
//!
//! A minimal client for single-turn text generation against the Vertex AI
//! `generateContent` endpoint. No prompt logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content(GenerateRequest::new("gemini-1.5-flash").user("Hello!"))
//!     .await?;
//! println!("{}", response.text);
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_LOCATION: &str = "us-central1";

/// Pure Vertex AI Gemini client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    access_token: String,
    project_id: String,
    location: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client for a project in the default location.
    pub fn new(access_token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            access_token: access_token.into(),
            project_id: project_id.into(),
            location: DEFAULT_LOCATION.to_string(),
            base_url: regional_base_url(DEFAULT_LOCATION),
        }
    }

    /// Create from `GOOGLE_ACCESS_TOKEN`, `VERTEX_PROJECT_ID` and the optional
    /// `VERTEX_LOCATION`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GOOGLE_ACCESS_TOKEN")
            .map_err(|_| GeminiError::Config("GOOGLE_ACCESS_TOKEN not set".into()))?;
        let project = std::env::var("VERTEX_PROJECT_ID")
            .map_err(|_| GeminiError::Config("VERTEX_PROJECT_ID not set".into()))?;
        let client = Self::new(token, project);
        Ok(match std::env::var("VERTEX_LOCATION") {
            Ok(location) => client.with_location(location),
            Err(_) => client,
        })
    }

    /// Set the region. Also resets the base URL to that region's endpoint.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self.base_url = regional_base_url(&self.location);
        self
    }

    /// Set a custom base URL (for proxies and local fakes).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.base_url, self.project_id, self.location, model
        )
    }

    /// Send a `generateContent` request and return the first candidate's text.
    pub async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint(&request.model))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let candidate = raw
            .candidates
            .first()
            .ok_or_else(|| GeminiError::EmptyResponse("no candidates".into()))?;
        let text = candidate.text();
        if text.is_empty() {
            let reason = candidate
                .finish_reason
                .clone()
                .unwrap_or_else(|| "unknown".to_string());
            return Err(GeminiError::EmptyResponse(reason));
        }

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(GenerateResponse {
            text,
            usage: raw.usage_metadata,
        })
    }

    /// Single-turn prompt → text completion.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let request = GenerateRequest::new(model).user(prompt);
        Ok(self.generate_content(request).await?.text)
    }
}

fn regional_base_url(location: &str) -> String {
    format!("https://{}-aiplatform.googleapis.com", location)
}
