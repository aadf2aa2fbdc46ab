//! File storage trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::document::DriveFile;

/// Hierarchical file storage (Google Drive in production).
#[async_trait]
pub trait DriveSource: Send + Sync {
    /// List the direct children (files and folders) of a folder.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>>;

    /// Download a file's binary content.
    async fn download(&self, file_id: &str) -> Result<Vec<u8>>;
}
