//! File-name classification into RFI / RFQ / Budget buckets.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::document::{Category, CategorySet, ClassifiedDocument, DriveFile};

lazy_static! {
    // "RFI", "RFIs", "rfi-014", "Request for Information"
    static ref RFI_REGEX: Regex = Regex::new(
        r"(?i)(?:^|[^a-z])rfis?(?:[^a-z]|$)|request[\s_-]*for[\s_-]*information"
    ).unwrap();

    // "RFQ", "RFP", "Request for Quote/Quotation/Proposal"
    static ref RFQ_REGEX: Regex = Regex::new(
        r"(?i)(?:^|[^a-z])rf[qp]s?(?:[^a-z]|$)|request[\s_-]*for[\s_-]*(?:quot(?:e|ation)|proposal)"
    ).unwrap();

    // Budgets, financial statements, cost reports, forecasts, pay applications
    static ref BUDGET_REGEX: Regex = Regex::new(
        r"(?i)budget|financ(?:e|ial)|cost[\s_-]*(?:report|summary)|forecast|pay[\s_-]*app(?:lication)?"
    ).unwrap();
}

/// Classify a file name.
///
/// Each category is checked independently in the order RFI, RFQ, Budget,
/// so a name may land in several buckets.
pub fn classify(file_name: &str) -> CategorySet {
    let mut set = CategorySet::new();
    if RFI_REGEX.is_match(file_name) {
        set.insert(Category::Rfi);
    }
    if RFQ_REGEX.is_match(file_name) {
        set.insert(Category::Rfq);
    }
    if BUDGET_REGEX.is_match(file_name) {
        set.insert(Category::Budget);
    }
    set
}

/// Classify every PDF in a listing. Non-PDF files are skipped.
pub fn classify_files(files: &[DriveFile]) -> Vec<ClassifiedDocument> {
    files
        .iter()
        .filter(|f| f.is_pdf())
        .map(|f| ClassifiedDocument::new(f.clone(), classify(&f.name)))
        .collect()
}

/// PDFs grouped by category, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub rfi: Vec<DriveFile>,
    pub rfq: Vec<DriveFile>,
    pub budget: Vec<DriveFile>,
}

impl Buckets {
    /// The budget document to extract: the most recently modified one.
    /// Ties and missing timestamps keep listing order.
    pub fn latest_budget(&self) -> Option<&DriveFile> {
        self.budget
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| {
                a.modified_time
                    .cmp(&b.modified_time)
                    .then_with(|| ib.cmp(ia))
            })
            .map(|(_, f)| f)
    }
}

/// Group classified documents into buckets.
pub fn bucket(documents: &[ClassifiedDocument]) -> Buckets {
    let mut buckets = Buckets::default();
    for doc in documents {
        if doc.categories.contains(Category::Rfi) {
            buckets.rfi.push(doc.file.clone());
        }
        if doc.categories.contains(Category::Rfq) {
            buckets.rfq.push(doc.file.clone());
        }
        if doc.categories.contains(Category::Budget) {
            buckets.budget.push(doc.file.clone());
        }
    }
    buckets
}
