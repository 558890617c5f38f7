mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use gaf_core::ArtifactStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use routes::create_router;
pub use state::AppState;

/// Server configuration
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a request, since storage calls have no timeout of their own
    pub request_timeout: Duration,
}

/// Start the gaf API server over an already restored store
pub async fn run_server(
    store: Arc<ArtifactStore>,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = with_layers(create_router(AppState::new(store)), config.request_timeout);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API stopped");
    Ok(())
}

/// Wrap the router in timeout, tracing and CORS layers.
///
/// A request that outlives `request_timeout` is answered with 504.
fn with_layers(router: Router, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");
}
