// gateway/src/main.rs

//! Exporter gateway binary.
//!
//! This binary exposes a small HTTP API on top of the `biconomy-exporter`
//! crate:
//!
//! - `GET /metrics`
//! - `GET /health`
//!
//! It embeds the node gauges, an HTTP client for the node's `/v3/info`
//! endpoint, and a background scrape loop that refreshes the gauges on a
//! fixed interval.

mod config;
mod routes;
mod scheduler;
mod state;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use biconomy_exporter::{DefaultScraper, ExporterMetrics, HttpNodeClient, Scraper};
use config::{Cli, GatewayConfig, LogLevel};
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables win.
    let _ = dotenvy::dotenv();

    let cfg: GatewayConfig = Cli::parse().into();
    init_tracing(cfg.log_level);

    if let Err(e) = run(cfg).await {
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

/// Logs to stdout. `RUST_LOG` overrides the configured level.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directives()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cfg: GatewayConfig) -> Result<(), String> {
    // ---------------------------
    // Metrics
    // ---------------------------

    let metrics = Arc::new(
        ExporterMetrics::new()
            .map_err(|e| format!("failed to initialise metrics registry: {e}"))?,
    );

    // ---------------------------
    // Node client + scraper
    // ---------------------------

    let client = HttpNodeClient::new(cfg.node.base_url.clone())
        .map_err(|e| format!("failed to create HttpNodeClient: {e}"))?;

    let scraper: Arc<DefaultScraper> =
        Arc::new(Scraper::new(client, metrics.clone(), cfg.scrape.toggles));

    // ---------------------------
    // HTTP router
    // ---------------------------

    let app_state: SharedState = Arc::new(AppState { metrics });
    let app = routes::router(app_state);

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", cfg.listen_addr))?;

    tracing::info!("Prometheus scraper listening on port {}", cfg.listen_addr.port());
    tracing::info!("Scraping Biconomy node at {}", cfg.node.base_url);
    tracing::info!("Scrape interval: {}ms", cfg.scrape.interval.as_millis());
    tracing::debug!(toggles = ?scraper.toggles(), "enabled metric families");

    // ---------------------------
    // Scrape loop
    // ---------------------------

    // The listener is already accepting; the first scrape fills the gauges.
    let interval = cfg.scrape.interval;
    tokio::spawn(scheduler::run_scrape_loop(scraper, interval));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("HTTP server error: {e}"))?;

    Ok(())
}

/// Waits for Ctrl-C and returns, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
