//! Server startup and routes.

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/tokens/{token}/pool", get(handlers::get_pool))
        .route("/tokens/{token}/candles", get(handlers::get_candles))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Binds and serves until the process is stopped.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind).await?;
        info!(addr = %listener.local_addr()?, "Chart API listening");
        axum::serve(listener, router(self.state)).await
    }
}
