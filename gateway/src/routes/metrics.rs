use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::state::SharedState;

/// `GET /metrics`
///
/// Renders the current gauge state in the Prometheus text format. Read-only:
/// scraping this endpoint never triggers an upstream fetch.
pub async fn metrics(State(state): State<SharedState>) -> impl IntoResponse {
    let body = state.metrics.render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.metrics.content_type())],
        body,
    )
}
