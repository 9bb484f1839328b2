use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
}

impl Liveness {
    pub const OK: Liveness = Liveness { status: "ok" };
}

/// `GET /health`
///
/// Process liveness only. Upstream reachability and scrape outcomes are
/// not consulted; this stays 200 while the node is down.
pub async fn health() -> (StatusCode, Json<Liveness>) {
    (StatusCode::OK, Json(Liveness::OK))
}
