//! Drive files and their classification.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// MIME type of PDF documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A file or folder in the storage hierarchy.
///
/// Fetched fresh on every request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub modified_time: Option<DateTime<Utc>>,
}

impl DriveFile {
    /// Create a new file entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            modified_time: None,
        }
    }

    /// Create a folder entry.
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FOLDER_MIME_TYPE)
    }

    /// Create a PDF entry.
    pub fn pdf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, PDF_MIME_TYPE)
    }

    /// Set the modification time.
    pub fn modified_at(mut self, time: DateTime<Utc>) -> Self {
        self.modified_time = Some(time);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    /// PDFs are recognised by MIME type or by a `.pdf` extension.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME_TYPE || self.name.to_lowercase().ends_with(".pdf")
    }
}

/// Fingerprint of a listing: the latest modification time, RFC 3339 with
/// millisecond precision. Empty when no file carries a timestamp.
pub fn fingerprint(files: &[DriveFile]) -> String {
    files
        .iter()
        .filter_map(|f| f.modified_time)
        .max()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Document category assigned from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "RFI")]
    Rfi,
    #[serde(rename = "RFQ")]
    Rfq,
    Budget,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfi => "RFI",
            Self::Rfq => "RFQ",
            Self::Budget => "Budget",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of categories a file name matched.
///
/// Matching is independent per category, so one file can be both an RFI
/// and a budget document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySet {
    rfi: bool,
    rfq: bool,
    budget: bool,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category. `Other` is implied by an empty set and is ignored.
    pub fn insert(&mut self, category: Category) {
        match category {
            Category::Rfi => self.rfi = true,
            Category::Rfq => self.rfq = true,
            Category::Budget => self.budget = true,
            Category::Other => {}
        }
    }

    pub fn with(mut self, category: Category) -> Self {
        self.insert(category);
        self
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Rfi => self.rfi,
            Category::Rfq => self.rfq,
            Category::Budget => self.budget,
            Category::Other => self.is_other(),
        }
    }

    /// True when no specific category matched.
    pub fn is_other(&self) -> bool {
        !self.rfi && !self.rfq && !self.budget
    }

    /// Matched categories in classification order (RFI, RFQ, Budget), or
    /// just `Other` when nothing matched.
    pub fn categories(&self) -> Vec<Category> {
        if self.is_other() {
            return vec![Category::Other];
        }
        [Category::Rfi, Category::Rfq, Category::Budget]
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }
}

/// A PDF together with the categories its name matched.
///
/// Lives only for the duration of one summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedDocument {
    pub file: DriveFile,
    pub categories: CategorySet,

    /// Document text, filled in once the file has been downloaded
    pub extracted_text: Option<String>,
}

impl ClassifiedDocument {
    /// A document that has not been read yet.
    pub fn new(file: DriveFile, categories: CategorySet) -> Self {
        Self {
            file,
            categories,
            extracted_text: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_pdf_by_mime_or_extension() {
        assert!(DriveFile::pdf("1", "scan").is_pdf());
        assert!(DriveFile::new("2", "Drawings.PDF", "application/octet-stream").is_pdf());
        assert!(!DriveFile::new("3", "notes.docx", "application/msword").is_pdf());
        assert!(DriveFile::folder("4", "Submittals").is_folder());
    }

    #[test]
    fn test_fingerprint_is_latest_modification() {
        let early = Utc.with_ymd_and_hms(2025, 1, 5, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 6, 30, 17, 45, 0).unwrap();
        let files = vec![
            DriveFile::pdf("1", "a.pdf").modified_at(early),
            DriveFile::pdf("2", "b.pdf").modified_at(late),
            DriveFile::pdf("3", "c.pdf"),
        ];

        assert_eq!(fingerprint(&files), "2025-06-30T17:45:00.000Z");
    }

    #[test]
    fn test_fingerprint_empty_without_timestamps() {
        assert_eq!(fingerprint(&[]), "");
        assert_eq!(fingerprint(&[DriveFile::pdf("1", "a.pdf")]), "");
    }

    #[test]
    fn test_category_set() {
        let set = CategorySet::new().with(Category::Budget).with(Category::Rfi);

        assert!(set.contains(Category::Rfi));
        assert!(set.contains(Category::Budget));
        assert!(!set.contains(Category::Rfq));
        assert!(!set.contains(Category::Other));
        assert_eq!(set.categories(), vec![Category::Rfi, Category::Budget]);

        assert_eq!(CategorySet::new().categories(), vec![Category::Other]);
    }

    #[test]
    fn test_category_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Category::Rfi).unwrap(), "\"RFI\"");
        assert_eq!(serde_json::to_string(&Category::Budget).unwrap(), "\"Budget\"");
    }
}
