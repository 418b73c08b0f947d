//! HTTP error mapping.
//!
//! Every pipeline rejection maps deterministically to one 4xx/5xx status
//! and a body carrying the stable reason string; `expired` additionally
//! carries the timestamp delta.

use auth_guard::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Gateway-level request errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Body decoded but a field is not usable (bad address, bad hex)
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Referenced resource does not exist
    #[error("not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Auth(err) => {
                let status = match err {
                    AuthError::Expired { .. } => StatusCode::BAD_REQUEST,
                    AuthError::InvalidSignature
                    | AuthError::Replayed
                    | AuthError::CapabilityDenied => StatusCode::FORBIDDEN,
                    AuthError::FeatureDisabled { .. } | AuthError::StoreUnavailable(_) => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                };
                let body = match err {
                    AuthError::Expired { ts_diff_ms } => {
                        json!({ "reason": err.reason(), "ts_diff_ms": ts_diff_ms })
                    }
                    _ => json!({ "reason": err.reason() }),
                };
                (status, body)
            }
            ApiError::Malformed(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "reason": "malformed", "detail": detail }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "reason": "not_found" })),
        };

        (status, Json(body)).into_response()
    }
}
