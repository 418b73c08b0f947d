//! Claim routes.

use crate::error::ApiError;
use crate::routes::songs::{parse_address, parse_signature};
use crate::state::{AppState, ClaimRecord};
use auth_guard::{AuthorizationApi, OperationPayload, SignedRequest, SigningMethod};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimBody {
    pub claim_id: String,
    pub claimant: String,
    pub song_id: String,
    pub amount: String,
    pub signer: String,
    pub signature: String,
    pub timestamp: i64,
    #[serde(default)]
    pub method: SigningMethod,
    pub nonce: Option<String>,
}

/// `POST /api/claims` - create an earnings claim.
pub async fn create_claim(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateClaimBody>,
) -> Result<(StatusCode, Json<ClaimRecord>), ApiError> {
    let claimant = parse_address(&body.claimant)?;
    let request = SignedRequest {
        payload: OperationPayload::CreateClaim {
            claim_id: body.claim_id.clone(),
            claimant,
            song_id: body.song_id.clone(),
            amount: body.amount.clone(),
        },
        signer: parse_address(&body.signer)?,
        signature: parse_signature(&body.signature)?,
        timestamp_ms: body.timestamp,
        method: body.method,
        nonce: body.nonce,
    };

    let admitted = state.auth.authorize_request(&request).await?;

    let record = ClaimRecord {
        claim_id: body.claim_id.clone(),
        claimant,
        song_id: body.song_id,
        amount: body.amount,
        created_at_ms: body.timestamp,
    };
    state.claims.insert(body.claim_id.clone(), record.clone());

    tracing::info!(claim = %body.claim_id, claimant = %admitted.signer, "claim created");
    Ok((StatusCode::CREATED, Json(record)))
}
