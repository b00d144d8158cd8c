use serde::{Deserialize, Serialize};

/// How a single traversal invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Saved,
    FetchFailed,
    NamingFailed,
    WriteFailed,
    /// Reached with a negative budget. `Mirror::run` never spawns such a
    /// branch, so runs driven through it do not produce this status.
    DepthExhausted,
    Skipped,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Saved => "saved",
            OutcomeStatus::FetchFailed => "fetch_failed",
            OutcomeStatus::NamingFailed => "naming_failed",
            OutcomeStatus::WriteFailed => "write_failed",
            OutcomeStatus::DepthExhausted => "depth_exhausted",
            OutcomeStatus::Skipped => "skipped",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            OutcomeStatus::FetchFailed | OutcomeStatus::NamingFailed | OutcomeStatus::WriteFailed
        )
    }
}

/// Per-branch record of one traversal invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchOutcome {
    pub locator: String,
    /// Distance from the root locator (the root is 0).
    pub depth: u32,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub bytes: usize,
    pub links_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BranchOutcome {
    pub fn new(locator: String, depth: u32, status: OutcomeStatus) -> Self {
        Self {
            locator,
            depth,
            status,
            filename: None,
            bytes: 0,
            links_found: 0,
            content_type: None,
            error: None,
        }
    }

    pub fn with_error(locator: String, depth: u32, status: OutcomeStatus, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(locator, depth, status)
        }
    }
}
