//! HTTP request handlers

use axum::{
    Router,
    middleware,
    routing::{get, post, put},
};

pub mod health;
pub mod profile;
pub mod swaps;

use crate::state::AppState;

/// Build all API routes
pub fn routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/swaps", post(swaps::create))
        .route("/swaps/match", post(swaps::commit))
        .route("/swaps/:id", get(swaps::fetch).delete(swaps::cancel))
        .route("/swaps/:id/candidates", get(swaps::candidates))
        .route("/swaps/:id/status", get(swaps::status))
        .route("/profile/location", put(profile::update_location))
        .route_layer(middleware::from_fn(crate::middleware::require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(protected)
}
