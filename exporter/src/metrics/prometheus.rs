//! Prometheus-backed node gauges.
//!
//! This module defines [`ExporterMetrics`], which owns a Prometheus
//! registry and the four per-chain gauge families republished from the
//! node's `/v3/info` response.

use std::fmt::Write as _;

use prometheus::{
    self, Encoder, GaugeVec, Opts, Registry, TEXT_FORMAT, TextEncoder, core::Collector,
};

/// Label names shared by every family, in `with_label_values` order.
pub const CHAIN_LABELS: [&str; 2] = ["chainId", "chainName"];

/// Errors raised while building the registry.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("failed to register metric: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// The gauge families exported by this crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GaugeFamily {
    Health,
    NativeBalance,
    ExecQueueActiveJobs,
    ExecQueuePendingJobs,
}

impl GaugeFamily {
    /// Render order.
    pub const ALL: [GaugeFamily; 4] = [
        GaugeFamily::Health,
        GaugeFamily::NativeBalance,
        GaugeFamily::ExecQueueActiveJobs,
        GaugeFamily::ExecQueuePendingJobs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GaugeFamily::Health => "biconomy_node_health",
            GaugeFamily::NativeBalance => "biconomy_native_balance",
            GaugeFamily::ExecQueueActiveJobs => "biconomy_exec_queue_active_jobs",
            GaugeFamily::ExecQueuePendingJobs => "biconomy_exec_queue_pending_jobs",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            GaugeFamily::Health => "Health status of Biconomy node (1 = healthy, 0 = unhealthy)",
            GaugeFamily::NativeBalance => "Native token balance of the node",
            GaugeFamily::ExecQueueActiveJobs => "Number of active jobs in execution queue",
            GaugeFamily::ExecQueuePendingJobs => "Number of pending jobs in execution queue",
        }
    }
}

/// Per-chain node gauges.
///
/// This is the main handle passed around in the exporter. It is created
/// once at startup, wrapped in an [`std::sync::Arc`], and shared between
/// the scrape cycle (writer) and the `/metrics` handler (reader). Resets
/// and per-chain writes are individually atomic only; a render racing a
/// scrape may observe a partially repopulated family.
pub struct ExporterMetrics {
    registry: Registry,
    pub node_health: GaugeVec,
    pub native_balance: GaugeVec,
    pub exec_queue_active_jobs: GaugeVec,
    pub exec_queue_pending_jobs: GaugeVec,
}

impl ExporterMetrics {
    /// Creates a fresh registry and registers the four gauge families.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let register = |family: GaugeFamily| -> Result<GaugeVec, MetricsError> {
            let gauge = GaugeVec::new(Opts::new(family.name(), family.help()), &CHAIN_LABELS)?;
            registry.register(Box::new(gauge.clone()))?;
            Ok(gauge)
        };

        let node_health = register(GaugeFamily::Health)?;
        let native_balance = register(GaugeFamily::NativeBalance)?;
        let exec_queue_active_jobs = register(GaugeFamily::ExecQueueActiveJobs)?;
        let exec_queue_pending_jobs = register(GaugeFamily::ExecQueuePendingJobs)?;

        Ok(Self {
            registry,
            node_health,
            native_balance,
            exec_queue_active_jobs,
            exec_queue_pending_jobs,
        })
    }

    /// Returns the gauge backing `family`.
    pub fn gauge(&self, family: GaugeFamily) -> &GaugeVec {
        match family {
            GaugeFamily::Health => &self.node_health,
            GaugeFamily::NativeBalance => &self.native_balance,
            GaugeFamily::ExecQueueActiveJobs => &self.exec_queue_active_jobs,
            GaugeFamily::ExecQueuePendingJobs => &self.exec_queue_pending_jobs,
        }
    }

    /// Drops every series of `family`.
    pub fn reset(&self, family: GaugeFamily) {
        self.gauge(family).reset();
    }

    /// Sets the series identified by `labels` (`chainId`, `chainName`).
    pub fn set(&self, family: GaugeFamily, labels: [&str; 2], value: f64) {
        self.gauge(family).with_label_values(&labels).set(value);
    }

    /// Current value of one series, if present.
    pub fn value(&self, family: GaugeFamily, labels: [&str; 2]) -> Option<f64> {
        self.gauge(family)
            .collect()
            .iter()
            .flat_map(|mf| mf.get_metric())
            .find(|m| {
                m.get_label().len() == CHAIN_LABELS.len()
                    && m.get_label().iter().all(|pair| {
                        CHAIN_LABELS
                            .iter()
                            .position(|name| *name == pair.get_name())
                            .is_some_and(|i| labels[i] == pair.get_value())
                    })
            })
            .map(|m| m.get_gauge().get_value())
    }

    /// Number of label tuples currently present in `family`.
    pub fn series_count(&self, family: GaugeFamily) -> usize {
        self.gauge(family)
            .collect()
            .iter()
            .map(|mf| mf.get_metric().len())
            .sum()
    }

    /// Content type of [`ExporterMetrics::render`] output.
    pub fn content_type(&self) -> &'static str {
        TEXT_FORMAT
    }

    /// Encodes all families into the Prometheus text exposition format.
    ///
    /// Families without series are still announced with their `# HELP` and
    /// `# TYPE` lines; the registry prunes them from `gather()` otherwise.
    pub fn render(&self) -> String {
        let gathered = self.registry.gather();
        let encoder = TextEncoder::new();
        let mut out = String::new();

        for family in GaugeFamily::ALL {
            let Some(mf) = gathered
                .iter()
                .find(|mf| mf.get_name() == family.name() && !mf.get_metric().is_empty())
            else {
                let _ = writeln!(out, "# HELP {} {}", family.name(), family.help());
                let _ = writeln!(out, "# TYPE {} gauge", family.name());
                continue;
            };

            let mut buffer = Vec::new();
            if let Err(e) = encoder.encode(std::slice::from_ref(mf), &mut buffer) {
                tracing::error!(family = family.name(), "failed to encode Prometheus metrics: {e}");
                continue;
            }
            out.push_str(&String::from_utf8_lossy(&buffer));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_still_announces_every_family() {
        let metrics = ExporterMetrics::new().expect("create metrics");
        let text = metrics.render();

        for family in GaugeFamily::ALL {
            assert!(
                text.contains(&format!("# HELP {} {}", family.name(), family.help())),
                "missing HELP for {}",
                family.name()
            );
            assert!(text.contains(&format!("# TYPE {} gauge", family.name())));
            assert_eq!(metrics.series_count(family), 0);
        }
    }

    #[test]
    fn set_reset_and_render_round_trip() {
        let metrics = ExporterMetrics::new().expect("create metrics");

        metrics.set(GaugeFamily::Health, ["1", "Ethereum"], 1.0);
        metrics.set(GaugeFamily::Health, ["137", "Polygon"], 0.0);
        metrics.set(GaugeFamily::NativeBalance, ["1", "Ethereum"], 1.5);

        assert_eq!(metrics.series_count(GaugeFamily::Health), 2);
        assert_eq!(metrics.value(GaugeFamily::Health, ["1", "Ethereum"]), Some(1.0));
        assert_eq!(metrics.value(GaugeFamily::Health, ["137", "Polygon"]), Some(0.0));
        assert_eq!(metrics.value(GaugeFamily::Health, ["1", "Polygon"]), None);

        let text = metrics.render();
        assert!(text.contains(r#"biconomy_node_health{chainId="1",chainName="Ethereum"} 1"#));
        assert!(text.contains(r#"biconomy_node_health{chainId="137",chainName="Polygon"} 0"#));
        assert!(text.contains(r#"biconomy_native_balance{chainId="1",chainName="Ethereum"} 1.5"#));

        metrics.reset(GaugeFamily::Health);
        assert_eq!(metrics.series_count(GaugeFamily::Health), 0);
        assert_eq!(metrics.series_count(GaugeFamily::NativeBalance), 1);
        assert!(!metrics.render().contains("biconomy_node_health{"));
    }

    #[test]
    fn nan_values_are_rendered_not_dropped() {
        let metrics = ExporterMetrics::new().expect("create metrics");
        metrics.set(GaugeFamily::NativeBalance, ["1", "Ethereum"], f64::NAN);

        let text = metrics.render();
        assert!(text.contains(r#"biconomy_native_balance{chainId="1",chainName="Ethereum"} NaN"#));
    }

    #[test]
    fn families_render_in_fixed_order() {
        let metrics = ExporterMetrics::new().expect("create metrics");
        metrics.set(GaugeFamily::ExecQueuePendingJobs, ["1", "Ethereum"], 3.0);

        let text = metrics.render();
        let positions: Vec<usize> = GaugeFamily::ALL
            .iter()
            .map(|f| text.find(&format!("# HELP {} ", f.name())).expect("family present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(metrics.content_type(), "text/plain; version=0.0.4");
    }
}
