//! Pure Google Drive v3 REST client.
//!
//! A minimal client for the parts of the Drive API the summary service needs:
//! listing the direct children of a folder and downloading file content.
//! Token acquisition is left to the caller; the client sends whatever bearer
//! token it was built with.
//!
//! # Example
//!
//! ```rust,ignore
//! use drive_client::DriveClient;
//!
//! let client = DriveClient::from_env()?;
//!
//! for file in client.list_children("1AbCdEf").await? {
//!     println!("{} ({})", file.name, file.mime_type);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{DriveError, Result};
pub use types::{DriveFile, FileListPage, FOLDER_MIME_TYPE};

const BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Fields requested from `files.list`.
const LIST_FIELDS: &str = "nextPageToken,files(id,name,mimeType,modifiedTime)";

/// Maximum page size accepted by `files.list`.
const PAGE_SIZE: &str = "1000";

#[derive(Clone)]
pub struct DriveClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl DriveClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GOOGLE_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GOOGLE_ACCESS_TOKEN")
            .map_err(|_| DriveError::Config("GOOGLE_ACCESS_TOKEN not set".into()))?;
        Ok(Self::new(token))
    }

    /// Set a custom base URL (for proxies and local fakes).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the direct children of a folder, following `nextPageToken`
    /// until the listing is exhausted. Trashed files are excluded.
    pub async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let query = children_query(folder_id);
        let url = format!("{}/files", self.base_url);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .bearer_auth(&self.access_token)
                .query(&[
                    ("q", query.as_str()),
                    ("fields", LIST_FIELDS),
                    ("pageSize", PAGE_SIZE),
                    ("supportsAllDrives", "true"),
                    ("includeItemsFromAllDrives", "true"),
                ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let resp = request.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!(folder_id, status = %status, error = %body, "Drive list failed");
                return Err(DriveError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let page: FileListPage = resp
                .json()
                .await
                .map_err(|e| DriveError::Parse(e.to_string()))?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(folder_id, count = files.len(), "Listed folder children");
        Ok(files)
    }

    /// Download the binary content of a file.
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("alt", "media"), ("supportsAllDrives", "true")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(file_id, status = %status, error = %body, "Drive download failed");
            return Err(DriveError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Build the `q` parameter selecting non-trashed children of a folder.
fn children_query(folder_id: &str) -> String {
    let escaped = folder_id.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}' in parents and trashed=false", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = DriveClient::new("ya29.test").with_base_url("http://localhost:9000");

        assert_eq!(client.access_token, "ya29.test");
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_children_query_escapes_quotes() {
        assert_eq!(
            children_query("abc123"),
            "'abc123' in parents and trashed=false"
        );
        assert_eq!(
            children_query("it's"),
            "'it\\'s' in parents and trashed=false"
        );
    }

    #[test]
    fn test_parse_list_page() {
        let json = r#"{
            "nextPageToken": "tok",
            "files": [
                {"id": "f1", "name": "Plans", "mimeType": "application/vnd.google-apps.folder"},
                {"id": "f2", "name": "RFI_001.pdf", "mimeType": "application/pdf",
                 "modifiedTime": "2025-03-01T12:00:00.000Z"}
            ]
        }"#;

        let page: FileListPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
        assert!(page.files[0].is_folder());
        assert!(!page.files[1].is_folder());
        assert!(page.files[1].modified_time.is_some());
    }

    #[test]
    fn test_parse_empty_page() {
        let page: FileListPage = serde_json::from_str("{}").unwrap();
        assert!(page.files.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
