//! Client for the upstream Biconomy node.
//!
//! The scrape cycle talks to the node through the [`NodeInfoSource`] trait;
//! [`HttpNodeClient`] is the reqwest-backed implementation used in
//! production. Each call is exactly one attempt: retrying is left to the
//! next scheduled cycle.

pub mod http;
pub mod types;

use async_trait::async_trait;

pub use http::{FetchError, HttpNodeClient, INFO_PATH};
pub use types::{ChainRecord, ChainStatus, HealthCheck, NodeInfo};

/// Abstract source of node status used by [`crate::scrape::Scraper`].
#[async_trait]
pub trait NodeInfoSource: Send + Sync {
    async fn fetch(&self) -> Result<NodeInfo, FetchError>;
}
