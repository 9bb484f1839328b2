//! Biconomy node exporter library crate.
//!
//! This crate provides the building blocks of a small Prometheus exporter
//! that polls a Biconomy node and republishes per-chain status as gauges:
//!
//! - configuration types (`config`),
//! - the upstream `/v3/info` client and its wire types (`node_client`),
//! - the Prometheus gauge registry (`metrics`),
//! - and the fetch-and-update cycle tying them together (`scrape`).
//!
//! The gateway binary composes these with an HTTP server and a timer.

pub mod config;
pub mod metrics;
pub mod node_client;
pub mod scrape;

// Re-export configuration types.
pub use config::{FeatureToggles, NodeClientConfig, ScrapeConfig};

// Re-export the upstream client and its data model.
pub use node_client::{
    ChainRecord, ChainStatus, FetchError, HealthCheck, HttpNodeClient, NodeInfo, NodeInfoSource,
};

// Re-export the metrics registry.
pub use metrics::{ExporterMetrics, GaugeFamily, MetricsError};

pub use scrape::Scraper;

/// Scraper wired to the production HTTP client.
pub type DefaultScraper = Scraper<HttpNodeClient>;
