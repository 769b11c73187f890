//! CitySwap API Server library
//!
//! HTTP surface over the swap-matching core. Each request is handled
//! independently; matching is client-driven, so there is no background
//! scheduler and the server keeps no per-client state between requests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use state::AppState;

/// Build the application router for the given state
pub fn app(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    let mut router = Router::new().nest("/api/v1", handlers::routes());

    if state.config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Start the CitySwap API server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    use std::net::SocketAddr;

    tracing::info!("Starting CitySwap API server on {}", config.bind_address);

    let addr: SocketAddr = config.bind_address.parse()?;
    let state = AppState::new(config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
