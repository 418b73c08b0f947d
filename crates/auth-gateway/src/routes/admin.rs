//! Capability-gated routes: upload enablement and administrative reads.
//!
//! These are not per-caller-identity actions; they run through the
//! capability gate (static key + feature flag) instead of the signature
//! pipeline.

use crate::error::ApiError;
use crate::state::AppState;
use auth_guard::{AuthorizationApi, Feature};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Header carrying the admin capability key.
pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// `POST /api/upload` - capability-gated upload slot.
///
/// Actual file handling lives with an external collaborator; this endpoint
/// only decides whether uploads are permitted at all.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .auth
        .authorize_capability(admin_key(&headers), Feature::Uploads)?;

    Ok(Json(json!({ "status": "accepted" })))
}

/// `GET /api/admin/config` - expose non-secret runtime configuration.
pub async fn read_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .auth
        .authorize_capability(admin_key(&headers), Feature::AdminReads)?;

    let config = state.auth.config();
    Ok(Json(json!({
        "ttlMs": config.ttl_ms,
        "domain": config.domain,
        "uploadsEnabled": config.capability.uploads_enabled,
        "adminReadsEnabled": config.capability.admin_reads_enabled,
        "replayRecords": state.replay_store.len(),
    })))
}

fn admin_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok())
}
