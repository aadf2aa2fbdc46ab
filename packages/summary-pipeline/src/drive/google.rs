//! Google Drive v3 implementation of the DriveSource trait.

use async_trait::async_trait;
use drive_client::DriveClient;

use crate::error::{Result, SummaryError};
use crate::traits::drive::DriveSource;
use crate::types::document::DriveFile;

/// Google Drive-backed file source.
#[derive(Clone)]
pub struct GoogleDrive {
    client: DriveClient,
}

impl GoogleDrive {
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }

    /// Create from `GOOGLE_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let client = DriveClient::from_env().map_err(|e| SummaryError::Config(Box::new(e)))?;
        Ok(Self::new(client))
    }
}

impl From<drive_client::DriveFile> for DriveFile {
    fn from(file: drive_client::DriveFile) -> Self {
        Self {
            id: file.id,
            name: file.name,
            mime_type: file.mime_type,
            modified_time: file.modified_time,
        }
    }
}

#[async_trait]
impl DriveSource for GoogleDrive {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let files = self
            .client
            .list_children(folder_id)
            .await
            .map_err(|e| SummaryError::Drive(Box::new(e)))?;
        Ok(files.into_iter().map(DriveFile::from).collect())
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        self.client
            .download(file_id)
            .await
            .map_err(|e| SummaryError::Drive(Box::new(e)))
    }
}
