//! REST API over the sizing calculator.
//!
//! Provides two endpoints:
//! - `GET /defaults`: the configuration the server fills missing fields from
//! - `POST /size`: sizes a system from a (partial) JSON configuration

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::SizingConfig;

pub use types::{ErrorResponse, SizeResponse};

/// Immutable application state shared across all request handlers.
///
/// Every request runs the pure calculator on its own inputs, so no locks are
/// needed.
pub struct AppState {
    /// Configuration returned by `GET /defaults` and overlaid by each
    /// `POST /size` body.
    pub defaults: SizingConfig,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/defaults", get(handlers::get_defaults))
        .route("/size", post(handlers::post_size))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
