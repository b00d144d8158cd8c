use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Fetch of {locator} failed: {reason}")]
    FetchError { locator: String, reason: String },

    #[error("Naming error: {0}")]
    NamingError(#[from] NamingError),

    #[error("IO error writing {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Reasons a filename cannot be derived for a fetched resource.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("invalid media type {0:?}")]
    InvalidMediaType(String),

    #[error("no usable file name in {0}")]
    EmptyName(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
