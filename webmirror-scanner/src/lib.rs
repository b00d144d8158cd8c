pub mod config;
pub mod error;
pub mod fetcher;
pub mod links;
pub mod mirror;
pub mod naming;
pub mod persist;
pub mod result;

pub use config::{MirrorConfig, VisitPolicy};
pub use error::{NamingError, ScanError};
pub use fetcher::{FetchedResource, Fetcher, HttpFetcher};
pub use links::LinkScan;
pub use mirror::{Budget, Mirror, ProgressCallback, ResultCallback, traverse};
pub use naming::Resolution;
pub use result::{BranchOutcome, OutcomeStatus};
