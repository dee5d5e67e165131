//! `GET /health`, served outside the `/api/v1/games` prefix so load
//! balancers can poll it without touching the event store.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Name reported in health responses.
pub const SERVICE_NAME: &str = "bowling-scorekeeper";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// `bowling-api` crate version.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
