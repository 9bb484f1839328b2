//! Configuration for the exporter core.
//!
//! This module aggregates configuration for:
//!
//! - the upstream node client (base URL),
//! - the scrape loop (interval + per-family feature toggles).
//!
//! The goal is to have plain structs with sensible defaults that the
//! gateway binary fills in from the command line / environment once at
//! startup and then treats as immutable.

use std::time::Duration;

/// Configuration for the upstream Biconomy node client.
#[derive(Clone, Debug)]
pub struct NodeClientConfig {
    /// Base URL of the node, e.g. `"http://localhost:3000"`.
    ///
    /// The `/v3/info` path is appended by the client.
    pub base_url: String,
}

impl Default for NodeClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Which metric families the scrape cycle maintains.
///
/// A disabled family is never reset and never written, so it renders as an
/// empty family for the life of the process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeatureToggles {
    /// `biconomy_node_health`.
    pub health_check: bool,
    /// `biconomy_native_balance`.
    pub native_balance: bool,
    /// Both `biconomy_exec_queue_active_jobs` and
    /// `biconomy_exec_queue_pending_jobs`.
    pub queue_metrics: bool,
}

impl FeatureToggles {
    /// All families enabled.
    pub const fn all() -> Self {
        Self {
            health_check: true,
            native_balance: true,
            queue_metrics: true,
        }
    }

    /// Interprets a raw toggle value. Only the literal `"false"` disables.
    pub fn parse_flag(raw: &str) -> bool {
        raw != "false"
    }
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration for the periodic scrape.
#[derive(Clone, Debug)]
pub struct ScrapeConfig {
    /// Period between the *starts* of consecutive scrape cycles.
    pub interval: Duration,
    pub toggles: FeatureToggles,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30_000),
            toggles: FeatureToggles::default(),
        }
    }
}
