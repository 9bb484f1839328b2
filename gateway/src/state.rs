//! Shared application state.

use std::sync::Arc;

use biconomy_exporter::ExporterMetrics;

/// State shared by the HTTP handlers.
///
/// This is wrapped in an [`Arc`] and passed to request handlers via Axum's
/// `State` extractor. The scrape task holds its own handle to the same
/// registry.
pub struct AppState {
    /// Gauges written by the scrape cycle and rendered on `/metrics`.
    pub metrics: Arc<ExporterMetrics>,
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;
