use crate::error::{Result, ScanError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Body and metadata of one successful retrieval.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub locator: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub status: u16,
}

/// Retrieves a locator. Implementations must not touch shared traversal state.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<FetchedResource>;
}

/// reqwest-backed fetcher. Redirects follow the client's default policy and
/// there is no timeout unless one is configured.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("webmirror/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout).connect_timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<FetchedResource> {
        debug!("Fetching {}", locator);

        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| ScanError::FetchError {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::FetchError {
                locator: locator.to_string(),
                reason: format!("server responded with {}", status),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| ScanError::FetchError {
            locator: locator.to_string(),
            reason: format!("failed to read body: {}", e),
        })?;

        Ok(FetchedResource {
            locator: locator.to_string(),
            bytes: bytes.to_vec(),
            content_type,
            status: status.as_u16(),
        })
    }
}
