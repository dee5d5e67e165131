//! HTTP routes.

pub mod games;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Assembles every route under its prefix. Layers and state are applied by
/// the caller.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/games", games::router())
}
