use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::info;
use url::Url;
use webmirror_scanner::result::BranchOutcome;
use webmirror_scanner::{LinkScan, Mirror, MirrorConfig, VisitPolicy};

/// Options for configuring a mirror operation
pub struct MirrorOptions {
    pub url: String,
    pub max_depth: u32,
    pub output_dir: PathBuf,
    pub threads: usize,
    pub visit_policy: VisitPolicy,
    pub link_scan: LinkScan,
    pub timeout: Option<Duration>,
    pub show_progress_bars: bool,
}

impl MirrorOptions {
    pub fn to_config(&self) -> MirrorConfig {
        let config = MirrorConfig::new(self.url.clone(), self.max_depth, self.output_dir.clone())
            .with_concurrency(self.threads)
            .with_visit_policy(self.visit_policy)
            .with_link_scan(self.link_scan);

        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorSummary {
    pub root: String,
    pub max_depth: u32,
    pub output_dir: PathBuf,
    pub elapsed_ms: u64,
    pub outcomes: Vec<BranchOutcome>,
}

/// Callback for reporting mirror progress
pub type MirrorProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Callback for reporting individual branch outcomes as they come in
pub type MirrorResultCallback = Arc<dyn Fn(BranchOutcome) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a mirror run with the given options.
/// Branch failures end up in the summary; only setup problems are errors.
pub async fn execute_mirror(
    options: MirrorOptions,
    progress_callback: Option<MirrorProgressCallback>,
    result_callback: Option<MirrorResultCallback>,
) -> Result<MirrorSummary, String> {
    Url::parse(&options.url).map_err(|e| format!("Invalid URL '{}': {}", options.url, e))?;

    if !options.output_dir.is_dir() {
        return Err(format!(
            "Output directory {} does not exist",
            options.output_dir.display()
        ));
    }

    let config = options.to_config();

    // Single spinner for the whole run (only if enabled)
    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .map_err(|e| format!("Invalid progress template: {}", e))?,
        );
        pb.set_message("Starting mirror...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(Arc::new(pb))
    } else {
        None
    };

    let fetched_count = Arc::new(AtomicUsize::new(0));

    let pb_clone = progress_bar.clone();
    let count_clone = fetched_count.clone();
    let progress_clone = progress_callback.clone();
    let internal_progress_callback: webmirror_scanner::ProgressCallback =
        Arc::new(move |locator: &str, depth: u32| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!(
                    "Mirroring... {} resources fetched (depth {}: {})",
                    count,
                    depth,
                    extract_url_path(locator)
                ));
            }
            if let Some(ref callback) = progress_clone {
                callback(format!("Downloading {}", locator));
            }
        });

    let mut mirror = Mirror::new(config)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?
        .with_progress_callback(internal_progress_callback);

    if let Some(ref cb) = result_callback {
        let cb_clone = cb.clone();
        let result_cb: webmirror_scanner::ResultCallback =
            Arc::new(move |outcome: &BranchOutcome| {
                cb_clone(outcome.clone());
            });
        mirror = mirror.with_result_callback(result_cb);
    }

    let start = Instant::now();
    let outcomes = mirror.run().await;
    let elapsed = start.elapsed();

    if let Some(ref pb) = progress_bar {
        let total = fetched_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Mirror complete! {} resources fetched", total));
    }

    info!(
        "Mirrored {} in {:.2}s ({} branches)",
        options.url,
        elapsed.as_secs_f64(),
        outcomes.len()
    );

    Ok(MirrorSummary {
        root: options.url,
        max_depth: options.max_depth,
        output_dir: options.output_dir,
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        outcomes,
    })
}
