//! HTTP client for the node's status endpoint.
//!
//! Issues `GET {base_url}/v3/info` and parses the JSON body into
//! [`NodeInfo`]. The node usually sits on a trusted network behind a
//! self-signed certificate, so TLS certificate validation is disabled.
//!
//! ```json
//! GET /v3/info
//!
//! {
//!   "supportedChains": [
//!     {
//!       "chainId": 1,
//!       "name": "Ethereum",
//!       "healthCheck": {
//!         "status": "healthy",
//!         "nativeBalance": "1.5",
//!         "execQueueActiveJobs": 2,
//!         "execQueuePendingJobs": 0
//!       }
//!     }
//!   ]
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::NodeInfoSource;
use super::types::NodeInfo;

/// Path of the status endpoint, relative to the node base URL.
pub const INFO_PATH: &str = "/v3/info";

/// Errors that can occur while fetching node status.
///
/// The scrape cycle folds all of these into a single "scrape failed"
/// outcome; the variants only matter for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// Connection, DNS or TLS failure.
    #[error("HTTP GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The node answered with a non-2xx status.
    #[error("node returned HTTP status {status}")]
    Status { status: StatusCode, body: String },
    /// A 2xx response whose body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    /// The body was not valid JSON or lacked `supportedChains`.
    #[error("failed to parse node info response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, if a non-2xx response was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// reqwest-backed [`NodeInfoSource`].
///
/// The inner [`Client`] pools connections and is cheap to share; wrap the
/// whole thing in an `Arc` to hand it to several tasks.
pub struct HttpNodeClient {
    base_url: String,
    client: Client,
}

impl HttpNodeClient {
    /// Constructs a client for the node at `base_url`,
    /// e.g. `"http://localhost:3000"`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(FetchError::Build)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Full URL of the status endpoint.
    pub fn info_url(&self) -> String {
        // Avoid accidental double slashes.
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            INFO_PATH.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl NodeInfoSource for HttpNodeClient {
    async fn fetch(&self) -> Result<NodeInfo, FetchError> {
        let url = self.info_url();

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            // Diagnostics only; an unreadable body is not worth a second error.
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let bytes = resp.bytes().await.map_err(FetchError::Body)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
