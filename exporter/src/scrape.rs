//! One fetch-and-update pass over the node gauges.
//!
//! A [`Scraper`] fetches `/v3/info` through a [`NodeInfoSource`] and, on
//! success, resets and repopulates every enabled gauge family from the
//! returned chain list. On failure nothing is touched, so `/metrics` keeps
//! serving the last good values.

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::FeatureToggles;
use crate::metrics::{ExporterMetrics, GaugeFamily};
use crate::node_client::{ChainStatus, FetchError, NodeInfoSource};

/// Drives scrape cycles for one upstream node.
pub struct Scraper<S> {
    source: S,
    metrics: Arc<ExporterMetrics>,
    toggles: FeatureToggles,
}

impl<S: NodeInfoSource> Scraper<S> {
    pub fn new(source: S, metrics: Arc<ExporterMetrics>, toggles: FeatureToggles) -> Self {
        Self {
            source,
            metrics,
            toggles,
        }
    }

    pub fn metrics(&self) -> &Arc<ExporterMetrics> {
        &self.metrics
    }

    pub fn toggles(&self) -> FeatureToggles {
        self.toggles
    }

    /// Runs one cycle. Returns `true` if the gauges were refreshed.
    pub async fn run(&self) -> bool {
        let info = match self.source.fetch().await {
            Ok(info) => info,
            Err(e) => {
                log_fetch_error(&e);
                return false;
            }
        };

        let enabled = self.enabled_families();
        for &family in &enabled {
            self.metrics.reset(family);
        }

        for record in &info.supported_chains {
            let status = record.status();
            for &family in &enabled {
                self.metrics
                    .set(family, status.labels(), gauge_value(family, &status));
            }
        }

        debug!(
            chains = info.supported_chains.len(),
            "Successfully fetched and updated metrics"
        );
        true
    }

    fn enabled_families(&self) -> Vec<GaugeFamily> {
        let mut families = Vec::with_capacity(GaugeFamily::ALL.len());
        if self.toggles.health_check {
            families.push(GaugeFamily::Health);
        }
        if self.toggles.native_balance {
            families.push(GaugeFamily::NativeBalance);
        }
        if self.toggles.queue_metrics {
            families.push(GaugeFamily::ExecQueueActiveJobs);
            families.push(GaugeFamily::ExecQueuePendingJobs);
        }
        families
    }
}

fn gauge_value(family: GaugeFamily, status: &ChainStatus) -> f64 {
    match family {
        GaugeFamily::Health => {
            if status.healthy {
                1.0
            } else {
                0.0
            }
        }
        GaugeFamily::NativeBalance => status.native_balance,
        GaugeFamily::ExecQueueActiveJobs => status.active_queue_jobs,
        GaugeFamily::ExecQueuePendingJobs => status.pending_queue_jobs,
    }
}

fn log_fetch_error(e: &FetchError) {
    error!("Error fetching node info: {e}");
    if let Some(status) = e.status() {
        error!(status = status.as_u16(), "Response status: {status}");
    }
    if let Some(body) = e.body() {
        error!("Response data: {body}");
    }
}
