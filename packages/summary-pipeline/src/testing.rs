//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the summary pipeline
//! without touching Google Drive or a real model.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{Result, SummaryError};
use crate::traits::{ai::AI, drive::DriveSource, text::TextExtractor};
use crate::types::document::DriveFile;

/// Structured reply used when no response is registered for a prompt.
pub const DEFAULT_AI_RESPONSE: &str = r#"{"messages": ["Mock message"], "risks": [], "updates": [], "insight": "Mock insight", "metrics": {"used": 0, "remaining": 0}}"#;

// =============================================================================
// MockDrive
// =============================================================================

/// An in-memory folder tree.
#[derive(Default)]
pub struct MockDrive {
    /// Children by folder ID
    children: Arc<RwLock<HashMap<String, Vec<DriveFile>>>>,

    /// File bytes by file ID
    contents: Arc<RwLock<HashMap<String, Vec<u8>>>>,

    /// Folders whose listing fails
    fail_listings: Arc<RwLock<HashSet<String>>>,

    /// Files whose download fails
    fail_downloads: Arc<RwLock<HashSet<String>>>,

    /// Artificial latency applied to every call
    delay: Option<Duration>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockDriveCall>>>,
}

/// Record of a call made to the mock drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockDriveCall {
    List { folder_id: String },
    Download { file_id: String },
}

impl MockDrive {
    /// Create an empty drive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direct children of a folder.
    pub fn with_children(self, folder_id: impl Into<String>, files: Vec<DriveFile>) -> Self {
        self.children.write().unwrap().insert(folder_id.into(), files);
        self
    }

    /// Add a file to a folder, keeping earlier children.
    pub fn with_file(self, folder_id: impl Into<String>, file: DriveFile) -> Self {
        self.children
            .write()
            .unwrap()
            .entry(folder_id.into())
            .or_default()
            .push(file);
        self
    }

    /// Set the downloadable bytes of a file.
    pub fn with_content(self, file_id: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(file_id.into(), content.into());
        self
    }

    /// Make listing a folder fail.
    pub fn fail_listing(self, folder_id: impl Into<String>) -> Self {
        self.fail_listings.write().unwrap().insert(folder_id.into());
        self
    }

    /// Make downloading a file fail.
    pub fn fail_download(self, file_id: impl Into<String>) -> Self {
        self.fail_downloads.write().unwrap().insert(file_id.into());
        self
    }

    /// Delay every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockDriveCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of download calls.
    pub fn download_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockDriveCall::Download { .. }))
            .count()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DriveSource for MockDrive {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        self.calls.write().unwrap().push(MockDriveCall::List {
            folder_id: folder_id.to_string(),
        });
        self.pause().await;

        if self.fail_listings.read().unwrap().contains(folder_id) {
            return Err(SummaryError::Drive(
                format!("mock listing failure for folder {}", folder_id).into(),
            ));
        }

        Ok(self
            .children
            .read()
            .unwrap()
            .get(folder_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        self.calls.write().unwrap().push(MockDriveCall::Download {
            file_id: file_id.to_string(),
        });
        self.pause().await;

        if self.fail_downloads.read().unwrap().contains(file_id) {
            return Err(SummaryError::Drive(
                format!("mock download failure for file {}", file_id).into(),
            ));
        }

        self.contents
            .read()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| SummaryError::Drive(format!("file {} not found", file_id).into()))
    }
}

// =============================================================================
// MockAI
// =============================================================================

/// A mock AI that answers by prompt content.
///
/// Responses are registered against a substring (usually a file name);
/// the first registered key contained in the prompt wins.
#[derive(Default)]
pub struct MockAI {
    /// Raw replies keyed by prompt substring, in registration order
    responses: Arc<RwLock<Vec<(String, String)>>>,

    /// Prompt substrings that produce an error
    failures: Arc<RwLock<Vec<String>>>,

    /// Fail every call
    always_fail: bool,

    delay: Option<Duration>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub enum MockAICall {
    Generate { prompt: String },
}

impl MockAI {
    /// Create a mock that answers every prompt with [`DEFAULT_AI_RESPONSE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `raw` to prompts containing `key`.
    pub fn with_response(self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((key.into(), raw.into()));
        self
    }

    /// Fail prompts containing `key`.
    pub fn fail_for(self, key: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(key.into());
        self
    }

    /// Fail every prompt.
    pub fn failing(mut self) -> Self {
        self.always_fail = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl AI for MockAI {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockAICall::Generate {
            prompt: prompt.to_string(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let fails = self.always_fail
            || self
                .failures
                .read()
                .unwrap()
                .iter()
                .any(|key| prompt.contains(key.as_str()));
        if fails {
            return Err(SummaryError::AI("mock AI failure".into()));
        }

        let reply = self
            .responses
            .read()
            .unwrap()
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, raw)| raw.clone());
        Ok(reply.unwrap_or_else(|| DEFAULT_AI_RESPONSE.to_string()))
    }
}

// =============================================================================
// Text extraction
// =============================================================================

/// Treats document bytes as UTF-8 text, so tests can skip building PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextExtractor;

impl TextExtractor for Utf8TextExtractor {
    fn extract_text(&self, data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}

// =============================================================================
// TestScenario
// =============================================================================

/// Builder for creating test scenarios.
pub struct TestScenario {
    ai: MockAI,
    drive: MockDrive,
    next_id: usize,
}

impl TestScenario {
    /// Create a new test scenario.
    pub fn new() -> Self {
        Self {
            ai: MockAI::new(),
            drive: MockDrive::new(),
            next_id: 0,
        }
    }

    /// Add a subfolder.
    pub fn with_folder(mut self, parent_id: &str, folder_id: &str, name: &str) -> Self {
        self.drive = self
            .drive
            .with_file(parent_id, DriveFile::folder(folder_id, name));
        self
    }

    /// Add a PDF whose extracted text is `content`.
    pub fn with_pdf(self, folder_id: &str, name: &str, content: &str) -> Self {
        self.with_document(folder_id, DriveFile::pdf("", name), content)
    }

    /// Add any file with content. An empty ID is replaced by a generated one.
    pub fn with_document(mut self, folder_id: &str, mut file: DriveFile, content: &str) -> Self {
        if file.id.is_empty() {
            self.next_id += 1;
            file.id = format!("file-{}", self.next_id);
        }
        self.drive = self
            .drive
            .with_content(file.id.clone(), content)
            .with_file(folder_id, file);
        self
    }

    /// Register a model reply for prompts mentioning `file_name`.
    pub fn with_ai_response(mut self, file_name: &str, raw: &str) -> Self {
        self.ai = self.ai.with_response(file_name, raw);
        self
    }

    /// Get both mocks.
    pub fn build(self) -> (MockDrive, MockAI) {
        (self.drive, self.ai)
    }
}

impl Default for TestScenario {
    fn default() -> Self {
        Self::new()
    }
}
