//! HTTP gateway for the signature authorization subsystem.
//!
//! Thin axum surface over `auth-guard`: each mutating route deserializes
//! the wire body, rebuilds the canonical operation payload, and runs the
//! full authorization pipeline before touching any state. Capability-gated
//! routes (uploads, admin reads) bypass the signature pipeline and use the
//! static-key gate instead.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/songs", post(routes::songs::register_song))
        .route("/api/songs/:id/play", post(routes::songs::log_play))
        .route("/api/claims", post(routes::claims::create_claim))
        .route("/api/upload", post(routes::admin::upload))
        .route("/api/admin/config", get(routes::admin::read_config))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /health` - liveness probe with replay-store stats.
async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> axum::Json<serde_json::Value> {
    axum::Json(json!({
        "status": "ok",
        "version": VERSION,
        "songs": state.songs.len(),
        "replayRecords": state.replay_store.len(),
    }))
}
