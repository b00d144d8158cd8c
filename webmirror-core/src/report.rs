// Report generation from a finished mirror run

use crate::mirror::{MirrorSummary, extract_url_path};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;
use webmirror_scanner::OutcomeStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub saved: usize,
    pub fetch_failed: usize,
    pub naming_failed: usize,
    pub write_failed: usize,
    pub depth_exhausted: usize,
    pub skipped: usize,
}

impl StatusCounts {
    pub fn tally(summary: &MirrorSummary) -> Self {
        let mut counts = StatusCounts::default();
        for outcome in &summary.outcomes {
            match outcome.status {
                OutcomeStatus::Saved => counts.saved += 1,
                OutcomeStatus::FetchFailed => counts.fetch_failed += 1,
                OutcomeStatus::NamingFailed => counts.naming_failed += 1,
                OutcomeStatus::WriteFailed => counts.write_failed += 1,
                OutcomeStatus::DepthExhausted => counts.depth_exhausted += 1,
                OutcomeStatus::Skipped => counts.skipped += 1,
            }
        }
        counts
    }

    pub fn failures(&self) -> usize {
        self.fetch_failed + self.naming_failed + self.write_failed
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    counts: StatusCounts,
    total_bytes: usize,
    #[serde(flatten)]
    summary: &'a MirrorSummary,
}

pub fn generate_mirror_report(summary: &MirrorSummary, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => generate_text_report(summary),
        ReportFormat::Json => generate_json_report(summary),
    }
}

fn total_bytes(summary: &MirrorSummary) -> usize {
    summary
        .outcomes
        .iter()
        .filter(|o| o.status == OutcomeStatus::Saved)
        .map(|o| o.bytes)
        .sum()
}

pub fn generate_json_report(summary: &MirrorSummary) -> String {
    let report = JsonReport {
        counts: StatusCounts::tally(summary),
        total_bytes: total_bytes(summary),
        summary,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn status_label(status: OutcomeStatus) -> String {
    match status {
        OutcomeStatus::Saved => "saved".green().to_string(),
        OutcomeStatus::FetchFailed | OutcomeStatus::NamingFailed | OutcomeStatus::WriteFailed => {
            status.as_str().red().to_string()
        }
        OutcomeStatus::DepthExhausted | OutcomeStatus::Skipped => {
            status.as_str().bright_black().to_string()
        }
    }
}

pub fn generate_text_report(summary: &MirrorSummary) -> String {
    let counts = StatusCounts::tally(summary);

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Root: {}\n", summary.root));
    report.push_str(&format!("  Max depth: {}\n", summary.max_depth));
    report.push_str(&format!("  Output: {}\n", summary.output_dir.display()));
    report.push_str(&format!("  Resources saved: {}\n", counts.saved));
    report.push_str(&format!("  Failures: {}\n", counts.failures()));
    if counts.skipped > 0 {
        report.push_str(&format!("  Skipped (already seen): {}\n", counts.skipped));
    }
    report.push_str(&format!("  Bytes written: {}\n", total_bytes(summary)));
    report.push_str(&format!(
        "  Elapsed: {:.2}s\n",
        summary.elapsed_ms as f64 / 1000.0
    ));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    // Group outcomes by host
    let mut by_host: BTreeMap<String, Vec<_>> = BTreeMap::new();
    for outcome in &summary.outcomes {
        let host = Url::parse(&outcome.locator)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());
        by_host.entry(host).or_default().push(outcome);
    }

    for (host, outcomes) in by_host.iter() {
        report.push_str(&format!("## {}\n", host));
        report.push_str(&format!("  {} branches\n\n", outcomes.len()));

        for outcome in outcomes {
            let mut line = format!(
                "  {} [d{}] {}",
                status_label(outcome.status),
                outcome.depth,
                extract_url_path(&outcome.locator)
            );
            if let Some(ref filename) = outcome.filename {
                line.push_str(&format!(" -> {}", filename));
            }
            if let Some(ref error) = outcome.error {
                line.push_str(&format!(" ({})", error).bright_black().to_string());
            }
            report.push_str(&line);
            report.push('\n');
        }
        report.push('\n');
    }

    report
}
