use crate::links::LinkScan;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Whether a locator may be fetched more than once in one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitPolicy {
    /// Every discovered locator is fetched, however often it reappears.
    #[default]
    Revisit,
    /// A locator string is fetched again only when it is reached with more
    /// remaining depth than any earlier visit.
    SkipSeen,
}

/// Immutable settings for one mirroring run, shared by every branch.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub root: String,
    pub max_depth: u32,
    pub output_root: PathBuf,
    /// Upper bound on fetch+persist sections running at the same time.
    pub concurrency: usize,
    pub visit_policy: VisitPolicy,
    pub link_scan: LinkScan,
    pub timeout: Option<Duration>,
}

impl MirrorConfig {
    pub fn new(root: impl Into<String>, max_depth: u32, output_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth,
            output_root: output_root.into(),
            concurrency: DEFAULT_CONCURRENCY,
            visit_policy: VisitPolicy::default(),
            link_scan: LinkScan::default(),
            timeout: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_visit_policy(mut self, visit_policy: VisitPolicy) -> Self {
        self.visit_policy = visit_policy;
        self
    }

    pub fn with_link_scan(mut self, link_scan: LinkScan) -> Self {
        self.link_scan = link_scan;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MirrorConfig::new("http://x.test/", 0, "/tmp/out");
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.visit_policy, VisitPolicy::Revisit);
        assert_eq!(config.link_scan, LinkScan::Raw);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        let config = MirrorConfig::new("http://x.test/", 0, "/tmp/out").with_concurrency(0);
        assert_eq!(config.concurrency, 1);
    }
}
