//! HTTP routes served by the gateway.
//!
//! - `GET /metrics`
//! - `GET /health`
//!
//! Anything else falls through to axum's default 404.

pub mod health;
pub mod metrics;

use axum::{Router, routing::get};

use crate::state::SharedState;

/// Builds the gateway router over `state`.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/metrics", get(metrics::metrics))
        .route("/health", get(health::health))
        .with_state(state)
}
