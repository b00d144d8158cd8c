// Tests for report generation functionality

use std::path::PathBuf;
use webmirror_core::mirror::MirrorSummary;
use webmirror_core::report::{ReportFormat, StatusCounts, generate_mirror_report};
use webmirror_scanner::{BranchOutcome, OutcomeStatus};

fn saved(locator: &str, depth: u32, filename: &str, bytes: usize) -> BranchOutcome {
    let mut outcome = BranchOutcome::new(locator.to_string(), depth, OutcomeStatus::Saved);
    outcome.filename = Some(filename.to_string());
    outcome.bytes = bytes;
    outcome.content_type = Some("text/html".to_string());
    outcome
}

fn sample_summary() -> MirrorSummary {
    MirrorSummary {
        root: "http://example.com/index".to_string(),
        max_depth: 1,
        output_dir: PathBuf::from("/tmp/mirror"),
        elapsed_ms: 1500,
        outcomes: vec![
            saved("http://example.com/index", 0, "index.html", 100),
            saved("http://example.com/a/report?id=9", 1, "report.html", 50),
            BranchOutcome::with_error(
                "http://cdn.example.org/missing".to_string(),
                1,
                OutcomeStatus::FetchFailed,
                "server responded with 404 Not Found".to_string(),
            ),
            BranchOutcome::new(
                "http://example.com/index".to_string(),
                1,
                OutcomeStatus::Skipped,
            ),
        ],
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json)));
    assert!(ReportFormat::from_str("csv").is_none());
}

// ============================================================================
// Status Count Tests
// ============================================================================

#[test]
fn test_status_counts() {
    let counts = StatusCounts::tally(&sample_summary());

    assert_eq!(counts.saved, 2);
    assert_eq!(counts.fetch_failed, 1);
    assert_eq!(counts.skipped, 1);
    assert_eq!(counts.failures(), 1);
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_summary() {
    let report = generate_mirror_report(&sample_summary(), ReportFormat::Text);

    assert!(report.contains("Root: http://example.com/index"));
    assert!(report.contains("Resources saved: 2"));
    assert!(report.contains("Failures: 1"));
    assert!(report.contains("Skipped (already seen): 1"));
    assert!(report.contains("Bytes written: 150"));
    assert!(report.contains("Elapsed: 1.50s"));
}

#[test]
fn test_text_report_groups_by_host() {
    let report = generate_mirror_report(&sample_summary(), ReportFormat::Text);

    assert!(report.contains("## example.com"));
    assert!(report.contains("## cdn.example.org"));
    assert!(report.contains("/a/report -> report.html"));
    assert!(report.contains("server responded with 404 Not Found"));
    assert!(report.contains("fetch_failed"));
}

#[test]
fn test_text_report_empty() {
    let mut summary = sample_summary();
    summary.outcomes.clear();

    let report = generate_mirror_report(&summary, ReportFormat::Text);

    assert!(report.contains("Resources saved: 0"));
    assert!(!report.contains("Skipped"));
    assert!(!report.contains("##"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report() {
    let report = generate_mirror_report(&sample_summary(), ReportFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["root"], "http://example.com/index");
    assert_eq!(value["total_bytes"], 150);
    assert_eq!(value["counts"]["saved"], 2);
    assert_eq!(value["counts"]["fetch_failed"], 1);
    assert_eq!(value["outcomes"].as_array().unwrap().len(), 4);
    assert_eq!(value["outcomes"][2]["status"], "fetch_failed");
    assert_eq!(value["outcomes"][0]["filename"], "index.html");
    assert!(value["outcomes"][2].get("filename").is_none());
}

#[test]
fn test_summary_round_trips_through_json() {
    let summary = sample_summary();
    let json = serde_json::to_string(&summary).unwrap();
    let back: MirrorSummary = serde_json::from_str(&json).unwrap();

    assert_eq!(back.outcomes.len(), summary.outcomes.len());
    assert_eq!(back.outcomes[1].filename.as_deref(), Some("report.html"));
}
