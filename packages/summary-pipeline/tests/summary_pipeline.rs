//! End-to-end pipeline behaviour against in-memory mocks.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio_test::{assert_err, assert_ok};

use summary_pipeline::testing::{MockAI, MockDrive, TestScenario, Utf8TextExtractor};
use summary_pipeline::types::extraction::{BUDGET_NOT_FOUND_INSIGHT, FAILED_INSIGHT};
use summary_pipeline::{
    Category, DriveFile, ExtractionStatus, PipelineConfig, SummaryError, SummaryService,
};

fn service(drive: MockDrive, ai: Arc<MockAI>) -> SummaryService {
    service_with(drive, ai, PipelineConfig::default())
}

fn service_with(drive: MockDrive, ai: Arc<MockAI>, config: PipelineConfig) -> SummaryService {
    SummaryService::with_text_extractor(Arc::new(drive), ai, Arc::new(Utf8TextExtractor), config)
}

#[tokio::test]
async fn folder_without_pdfs_gets_budget_placeholder() {
    let drive = MockDrive::new().with_children(
        "project",
        vec![DriveFile::new("1", "site-photo.jpg", "image/jpeg")],
    );
    let ai = Arc::new(MockAI::new());
    let svc = service(drive, ai.clone());

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.documents.len(), 1);
    assert_eq!(payload.documents[0].status, ExtractionStatus::NotFound);
    assert_eq!(payload.documents[0].insight, BUDGET_NOT_FOUND_INSIGHT);
    assert!(payload.rfi.is_empty());
    assert!(payload.rfq.is_empty());
    assert_eq!(payload.counts.total_files, 1);
    assert!(ai.calls().is_empty());
}

#[tokio::test]
async fn rfi_and_budget_documents_are_summarized() {
    let (drive, ai) = TestScenario::new()
        .with_folder("project", "docs", "Documents")
        .with_pdf("docs", "RFI_2025.pdf", "Please confirm the curtain wall anchors.")
        .with_pdf("docs", "Budget_Q2.pdf", "Committed 1.2M of 2M")
        .with_ai_response(
            "RFI_2025.pdf",
            r#"{"messages": ["Confirm curtain wall anchors"], "risks": [], "updates": [], "insight": "Open with architect"}"#,
        )
        .with_ai_response(
            "Budget_Q2.pdf",
            r#"Here you go: {"used": "$1,200,000", "remaining": "$800,000", "risks": ["Contingency thin"], "insight": "60% committed"}"#,
        )
        .build();
    let svc = service(drive, Arc::new(ai));

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.rfi.len(), 1);
    assert_eq!(payload.counts.rfi_count, 1);
    assert_eq!(payload.counts.rfq_count, 0);
    assert_eq!(payload.counts.total_files, 2);
    assert_eq!(payload.rfi[0].insight, "Open with architect");

    let budget = &payload.documents[0];
    assert_eq!(budget.category, Category::Budget);
    assert_eq!(budget.file_name, "Budget_Q2.pdf");
    let metrics = budget.metrics.clone().unwrap();
    assert_eq!(metrics.used, Some(1_200_000.0));
    assert_eq!(metrics.remaining, Some(800_000.0));
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let (drive, ai) = TestScenario::new()
        .with_pdf("project", "RFI_001.pdf", "question one")
        .with_pdf("project", "RFQ_steel.pdf", "quote for steel")
        .build();
    let drive = Arc::new(drive);
    let ai = Arc::new(ai);
    let svc = SummaryService::with_text_extractor(
        drive.clone(),
        ai.clone(),
        Arc::new(Utf8TextExtractor),
        PipelineConfig::default(),
    );

    let first = assert_ok!(svc.summarize("project").await);
    let downloads = drive.download_count();
    let ai_calls = ai.calls().len();
    let second = assert_ok!(svc.summarize("project").await);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        serde_json::to_string(&*first).unwrap(),
        serde_json::to_string(&*second).unwrap()
    );
    assert_eq!(drive.download_count(), downloads);
    assert_eq!(ai.calls().len(), ai_calls);
    assert_eq!(svc.cache().len().await, 1);
}

#[tokio::test]
async fn modified_file_invalidates_cache() {
    let early = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

    let drive = MockDrive::new()
        .with_children("project", vec![DriveFile::pdf("1", "RFI_1.pdf").modified_at(early)])
        .with_content("1", "question");
    let svc = service(drive, Arc::new(MockAI::new()));
    let before = assert_ok!(svc.summarize("project").await);

    // Same folder, newer listing
    let drive = MockDrive::new()
        .with_children("project", vec![DriveFile::pdf("1", "RFI_1.pdf").modified_at(later)])
        .with_content("1", "question");
    let ai = Arc::new(MockAI::new());
    let svc = SummaryService::with_text_extractor(
        Arc::new(drive),
        ai.clone(),
        Arc::new(Utf8TextExtractor),
        PipelineConfig::default(),
    )
    .with_cache(Arc::new(summary_pipeline::SummaryCache::new(Duration::from_secs(600))));
    svc.cache().put("project", "2025-01-01T00:00:00.000Z", before.clone()).await;

    let after = assert_ok!(svc.summarize("project").await);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(ai.calls().len(), 1);
}

#[tokio::test]
async fn malformed_ai_output_is_kept_verbatim() {
    let raw = "The RFI asks about {unbalanced braces and no JSON at all";
    let (drive, ai) = TestScenario::new()
        .with_pdf("project", "RFI_7.pdf", "some question")
        .with_ai_response("RFI_7.pdf", raw)
        .build();
    let svc = service(drive, Arc::new(ai));

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.rfi[0].status, ExtractionStatus::Fallback);
    assert_eq!(payload.rfi[0].insight, raw);
}

#[tokio::test]
async fn file_matching_two_categories_lands_in_both() {
    let (drive, ai) = TestScenario::new()
        .with_pdf("project", "RFI_budget_clarification.pdf", "clarify line items")
        .build();
    let svc = service(drive, Arc::new(ai));

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.rfi.len(), 1);
    assert_eq!(payload.documents[0].file_name, "RFI_budget_clarification.pdf");
    assert_eq!(payload.documents[0].status, ExtractionStatus::Parsed);
}

#[tokio::test]
async fn latest_budget_document_wins() {
    let old = Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap();
    let new = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let drive = MockDrive::new()
        .with_children(
            "project",
            vec![
                DriveFile::pdf("a", "Budget_2024.pdf").modified_at(old),
                DriveFile::pdf("b", "Financial_Report_April.pdf").modified_at(new),
            ],
        )
        .with_content("a", "old")
        .with_content("b", "new");
    let ai = Arc::new(MockAI::new());
    let svc = service(drive, ai.clone());

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.documents.len(), 1);
    assert_eq!(payload.documents[0].file_name, "Financial_Report_April.pdf");
    assert_eq!(ai.calls().len(), 1);
}

#[tokio::test]
async fn listing_failure_is_an_error() {
    let drive = MockDrive::new().fail_listing("project");
    let svc = service(drive, Arc::new(MockAI::new()));

    let err = assert_err!(svc.summarize("project").await);
    assert!(matches!(err, SummaryError::Drive(_)));
    assert_eq!(svc.cache().len().await, 0);
}

#[tokio::test]
async fn failing_documents_do_not_abort_the_summary() {
    let (drive, ai) = TestScenario::new()
        .with_pdf("project", "RFI_1.pdf", "fine")
        .with_document("project", DriveFile::pdf("broken", "RFI_2.pdf"), "unused")
        .with_pdf("project", "RFQ_1.pdf", "ai will fail")
        .build();
    let drive = drive.fail_download("broken");
    let ai = ai.fail_for("RFQ_1.pdf");
    let svc = service(drive, Arc::new(ai));

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.rfi[0].status, ExtractionStatus::Parsed);
    assert_eq!(payload.rfi[1].status, ExtractionStatus::Failed);
    assert_eq!(payload.rfi[1].insight, FAILED_INSIGHT);
    assert_eq!(payload.rfq[0].status, ExtractionStatus::Failed);
    assert_eq!(payload.counts.rfi_count, 2);
    assert_eq!(payload.counts.rfq_count, 1);
}

#[tokio::test]
async fn slow_model_times_out_per_document() {
    let (drive, ai) = TestScenario::new()
        .with_pdf("project", "RFI_1.pdf", "question")
        .build();
    let ai = ai.with_delay(Duration::from_millis(500));
    let config = PipelineConfig::default().with_call_timeout(Duration::from_millis(25));
    let svc = service_with(drive, Arc::new(ai), config);

    let payload = assert_ok!(svc.summarize("project").await);

    assert_eq!(payload.rfi[0].status, ExtractionStatus::Failed);
}

#[tokio::test]
async fn nested_folders_are_flattened() {
    let (drive, ai) = TestScenario::new()
        .with_folder("project", "a", "Phase 1")
        .with_folder("a", "b", "RFIs")
        .with_pdf("b", "RFI_deep.pdf", "deep question")
        .with_pdf("project", "notes.pdf", "not classified")
        .build();
    let svc = service(drive, Arc::new(ai));

    let files = assert_ok!(svc.list_files("project").await);
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["notes.pdf", "RFI_deep.pdf"]);

    let payload = assert_ok!(svc.summarize("project").await);
    assert_eq!(payload.rfi.len(), 1);
    assert_eq!(payload.counts.total_files, 2);
}
