//! HTTP service layer.
//!
//! One prediction endpoint plus a liveness probe, served by axum. The
//! router is built separately from the listener so tests can drive it
//! in-process.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod handlers;
pub mod state;
pub mod types;

pub use state::AppState;
pub use types::{HealthResponse, PredictResponse};

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
        .layer(cors)
}

/// Bind and serve until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(state);

    info!("prediction service listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
