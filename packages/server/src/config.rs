use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use summary_pipeline::PipelineConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub google_access_token: String,
    pub vertex_project_id: String,
    pub vertex_location: String,
    pub vertex_model: String,
    pub cache_ttl: Duration,
    pub concurrency: usize,
    pub call_timeout: Duration,
    pub max_folders: usize,
    pub max_text_chars: usize,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            google_access_token: env::var("GOOGLE_ACCESS_TOKEN")
                .context("GOOGLE_ACCESS_TOKEN must be set")?,
            vertex_project_id: env::var("VERTEX_PROJECT_ID")
                .context("VERTEX_PROJECT_ID must be set")?,
            vertex_location: env::var("VERTEX_LOCATION")
                .unwrap_or_else(|_| "us-central1".to_string()),
            vertex_model: env::var("VERTEX_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            cache_ttl: Duration::from_secs(parse_var("SUMMARY_CACHE_TTL_SECS", 600)?),
            concurrency: parse_var("SUMMARY_CONCURRENCY", 4)?,
            call_timeout: Duration::from_secs(parse_var("EXTERNAL_CALL_TIMEOUT_SECS", 30)?),
            max_folders: parse_var("SUMMARY_MAX_FOLDERS", 5_000)?,
            max_text_chars: parse_var("SUMMARY_MAX_TEXT_CHARS", 30_000)?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or_default(),
        })
    }

    /// Pipeline tunables derived from this configuration
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_concurrency(self.concurrency)
            .with_call_timeout(self.call_timeout)
            .with_max_folders(self.max_folders)
            .with_max_text_chars(self.max_text_chars)
            .with_cache_ttl(self.cache_ttl)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins("https://app.example.com, http://localhost:3000,,"),
            vec!["https://app.example.com", "http://localhost:3000"]
        );
        assert!(split_origins("  ").is_empty());
    }

    #[test]
    fn test_pipeline_config_from_settings() {
        let config = Config {
            port: 8080,
            google_access_token: "token".into(),
            vertex_project_id: "project".into(),
            vertex_location: "us-central1".into(),
            vertex_model: "gemini-1.5-flash".into(),
            cache_ttl: Duration::from_secs(60),
            concurrency: 0,
            call_timeout: Duration::from_secs(5),
            max_folders: 10,
            max_text_chars: 1_000,
            allowed_origins: vec![],
        };

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.concurrency, 1);
        assert_eq!(pipeline.cache_ttl, Duration::from_secs(60));
        assert_eq!(pipeline.max_folders, 10);
    }
}
