//! Metrics republished from the node.
//!
//! This module defines the four per-chain Prometheus gauges and renders
//! them in the Prometheus text format for the gateway's `/metrics` route.
//!
//! Typical usage:
//!
//! ```ignore
//! use std::sync::Arc;
//! use biconomy_exporter::metrics::{ExporterMetrics, GaugeFamily};
//!
//! let metrics = Arc::new(ExporterMetrics::new()?);
//!
//! // Scrape cycle:
//! metrics.reset(GaugeFamily::Health);
//! metrics.set(GaugeFamily::Health, ["1", "Ethereum"], 1.0);
//!
//! // HTTP handler:
//! let body = metrics.render();
//! ```

pub mod prometheus;

pub use self::prometheus::{CHAIN_LABELS, ExporterMetrics, GaugeFamily, MetricsError};
