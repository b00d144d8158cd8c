use crate::config::{MirrorConfig, VisitPolicy};
use crate::error::{Result, ScanError};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::links::scan_links;
use crate::naming;
use crate::persist::persist;
use crate::result::{BranchOutcome, OutcomeStatus};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, warn};
use url::Url;

/// Called with (locator, depth) when a fetch starts.
pub type ProgressCallback = Arc<dyn Fn(&str, u32) + Send + Sync>;
/// Called with every branch outcome as soon as it is known.
pub type ResultCallback = Arc<dyn Fn(&BranchOutcome) + Send + Sync>;

/// Remaining recursion depth carried by a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Budget(i64);

impl Budget {
    pub fn new(max_depth: u32) -> Self {
        Self(i64::from(max_depth))
    }

    pub fn remaining(&self) -> i64 {
        self.0
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 < 0
    }

    pub fn child(&self) -> Self {
        Self(self.0 - 1)
    }
}

pub struct Mirror {
    config: MirrorConfig,
    fetcher: Arc<dyn Fetcher>,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

/// State shared by every branch of one run.
struct Traversal {
    config: MirrorConfig,
    fetcher: Arc<dyn Fetcher>,
    permits: Semaphore,
    /// Highest remaining budget each locator has been visited with.
    seen: Option<Mutex<HashMap<String, i64>>>,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl Mirror {
    /// Builds a mirror that fetches over HTTP.
    pub fn new(config: MirrorConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: MirrorConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config,
            fetcher,
            progress_callback: None,
            result_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Mirrors the configured root and returns once every branch has ended.
    /// Outcomes are listed parent first, then each child's subtree in link order.
    pub async fn run(&self) -> Vec<BranchOutcome> {
        info!(
            "Mirroring {} to depth {} into {}",
            self.config.root,
            self.config.max_depth,
            self.config.output_root.display()
        );

        let traversal = Arc::new(Traversal {
            config: self.config.clone(),
            fetcher: self.fetcher.clone(),
            permits: Semaphore::new(self.config.concurrency.max(1)),
            seen: match self.config.visit_policy {
                VisitPolicy::Revisit => None,
                VisitPolicy::SkipSeen => Some(Mutex::new(HashMap::new())),
            },
            progress_callback: self.progress_callback.clone(),
            result_callback: self.result_callback.clone(),
        });

        let outcomes = traverse_branch(
            traversal,
            self.config.root.clone(),
            Budget::new(self.config.max_depth),
            0,
        )
        .await;

        info!("Mirror complete. {} branches ended", outcomes.len());
        outcomes
    }
}

/// Mirrors `root` into `output_root` over HTTP, following links `max_depth`
/// levels deep. Branch failures are reported in the returned outcomes.
pub async fn traverse(
    root: &str,
    max_depth: u32,
    output_root: impl Into<PathBuf>,
) -> Result<Vec<BranchOutcome>> {
    Url::parse(root).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", root, e)))?;

    let mirror = Mirror::new(MirrorConfig::new(root, max_depth, output_root))?;
    Ok(mirror.run().await)
}

fn traverse_branch(
    traversal: Arc<Traversal>,
    locator: String,
    budget: Budget,
    depth: u32,
) -> BoxFuture<'static, Vec<BranchOutcome>> {
    async move {
        if budget.is_exhausted() {
            debug!("Depth budget exhausted at {}", locator);
            let outcome = BranchOutcome::new(locator, depth, OutcomeStatus::DepthExhausted);
            traversal.report(&outcome);
            return vec![outcome];
        }

        if !traversal.claim(&locator, budget).await {
            debug!("Already mirrored {}, skipping", locator);
            let outcome = BranchOutcome::new(locator, depth, OutcomeStatus::Skipped);
            traversal.report(&outcome);
            return vec![outcome];
        }

        let (outcome, links) = traversal.visit(&locator, depth).await;
        traversal.report(&outcome);
        let mut outcomes = vec![outcome];

        // Children of the last level would all be depth-exhausted.
        if budget.remaining() == 0 || links.is_empty() {
            return outcomes;
        }

        debug!("Spawning {} branches from {}", links.len(), locator);
        let handles: Vec<_> = links
            .into_iter()
            .map(|link| {
                tokio::spawn(traverse_branch(
                    traversal.clone(),
                    link,
                    budget.child(),
                    depth + 1,
                ))
            })
            .collect();

        for handle in handles {
            match handle.await {
                Ok(child_outcomes) => outcomes.extend(child_outcomes),
                Err(e) => warn!("Branch below {} ended abnormally: {}", locator, e),
            }
        }

        debug!("All branches below {} finished", locator);
        outcomes
    }
    .boxed()
}

impl Traversal {
    /// Under `SkipSeen`, a locator is visited again only when it arrives with
    /// more remaining depth than any earlier visit, so its subtree still
    /// reaches `max_depth`.
    async fn claim(&self, locator: &str, budget: Budget) -> bool {
        let Some(ref seen) = self.seen else {
            return true;
        };

        let mut seen = seen.lock().await;
        match seen.get(locator) {
            Some(&best) if best >= budget.remaining() => false,
            _ => {
                seen.insert(locator.to_string(), budget.remaining());
                true
            }
        }
    }

    fn report(&self, outcome: &BranchOutcome) {
        if let Some(ref callback) = self.result_callback {
            callback(outcome);
        }
    }

    /// Fetch, persist and extract for one locator. A fetch permit is held for
    /// the network and disk work only.
    async fn visit(&self, locator: &str, depth: u32) -> (BranchOutcome, Vec<String>) {
        let Ok(permit) = self.permits.acquire().await else {
            let outcome = BranchOutcome::with_error(
                locator.to_string(),
                depth,
                OutcomeStatus::FetchFailed,
                "fetch permits closed".to_string(),
            );
            return (outcome, Vec::new());
        };

        if let Some(ref callback) = self.progress_callback {
            callback(locator, depth);
        }

        info!("Downloading {}", locator);
        let resource = match self.fetcher.fetch(locator).await {
            Ok(resource) => resource,
            Err(e) => {
                warn!("Download of {} failed: {}", locator, e);
                let outcome = BranchOutcome::with_error(
                    locator.to_string(),
                    depth,
                    OutcomeStatus::FetchFailed,
                    e.to_string(),
                );
                return (outcome, Vec::new());
            }
        };

        let mut outcome = BranchOutcome::new(locator.to_string(), depth, OutcomeStatus::Saved);
        outcome.bytes = resource.bytes.len();
        outcome.content_type = resource.content_type.clone();

        let resolution = naming::resolve(locator, resource.content_type.as_deref());
        let filename = match resolution.into_result() {
            Ok(filename) => filename,
            Err(e) => {
                warn!("Cannot name {}: {}", locator, e);
                outcome.status = OutcomeStatus::NamingFailed;
                outcome.error = Some(e.to_string());
                return (outcome, Vec::new());
            }
        };

        if let Err(e) = persist(&self.config.output_root, &filename, &resource.bytes).await {
            warn!("Cannot save {}: {}", locator, e);
            outcome.status = OutcomeStatus::WriteFailed;
            outcome.error = Some(e.to_string());
            return (outcome, Vec::new());
        }
        drop(permit);

        info!("{} successfully downloaded as {}", locator, filename);
        outcome.filename = Some(filename);

        let links = scan_links(
            self.config.link_scan,
            &resource.bytes,
            locator,
            resource.content_type.as_deref(),
        );
        outcome.links_found = links.len();

        (outcome, links)
    }
}
