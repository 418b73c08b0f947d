//! Song routes: registration and play logging.
//!
//! Both are mutating operations; each body carries the operation's domain
//! fields plus `signer`, `signature`, `timestamp`, and optionally `method`
//! and `nonce`, and goes through the full authorization pipeline before
//! any state changes.

use crate::error::ApiError;
use crate::state::{AppState, SongRecord};
use auth_guard::{
    AuthorizationApi, EcdsaSignature, OperationPayload, SignedRequest, SigningMethod,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shared_types::Address;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSongBody {
    pub id: String,
    /// Catalog metadata only; not part of the signed canonical form.
    pub title: Option<String>,
    pub artist_address: String,
    pub ipfs_hash: String,
    pub payment_model: String,
    pub signer: String,
    pub signature: String,
    pub timestamp: i64,
    #[serde(default)]
    pub method: SigningMethod,
    pub nonce: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPlayBody {
    pub listener_address: String,
    pub amount: String,
    pub payment_type: String,
    pub signer: String,
    pub signature: String,
    pub timestamp: i64,
    #[serde(default)]
    pub method: SigningMethod,
    pub nonce: Option<String>,
}

/// `POST /api/songs` - register a song.
pub async fn register_song(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterSongBody>,
) -> Result<(StatusCode, Json<SongRecord>), ApiError> {
    let artist_address = parse_address(&body.artist_address)?;
    let request = SignedRequest {
        payload: OperationPayload::RegisterSong {
            id: body.id.clone(),
            artist_address,
            ipfs_hash: body.ipfs_hash.clone(),
            payment_model: body.payment_model.clone(),
        },
        signer: parse_address(&body.signer)?,
        signature: parse_signature(&body.signature)?,
        timestamp_ms: body.timestamp,
        method: body.method,
        nonce: body.nonce,
    };

    let admitted = state.auth.authorize_request(&request).await?;

    let record = SongRecord {
        id: body.id.clone(),
        title: body.title,
        artist_address,
        ipfs_hash: body.ipfs_hash,
        payment_model: body.payment_model,
        plays: 0,
        registered_at_ms: body.timestamp,
    };
    state.songs.insert(body.id.clone(), record.clone());

    tracing::info!(song = %body.id, artist = %admitted.signer, "song registered");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /api/songs/{id}/play` - log one play.
pub async fn log_play(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<LogPlayBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.songs.contains_key(&id) {
        return Err(ApiError::NotFound);
    }

    let request = SignedRequest {
        payload: OperationPayload::LogPlay {
            song_id: id.clone(),
            listener_address: parse_address(&body.listener_address)?,
            amount: body.amount.clone(),
            payment_type: body.payment_type.clone(),
        },
        signer: parse_address(&body.signer)?,
        signature: parse_signature(&body.signature)?,
        timestamp_ms: body.timestamp,
        method: body.method,
        nonce: body.nonce,
    };

    let admitted = state.auth.authorize_request(&request).await?;

    let plays = match state.songs.get_mut(&id) {
        Some(mut song) => {
            song.plays += 1;
            song.plays
        }
        None => return Err(ApiError::NotFound),
    };

    tracing::info!(song = %id, listener = %admitted.signer, plays, "play recorded");
    Ok(Json(json!({
        "status": "recorded",
        "songId": id,
        "listener": admitted.signer,
        "plays": plays,
    })))
}

pub(crate) fn parse_address(input: &str) -> Result<Address, ApiError> {
    input
        .parse()
        .map_err(|_| ApiError::Malformed(format!("invalid address: {input}")))
}

pub(crate) fn parse_signature(input: &str) -> Result<EcdsaSignature, ApiError> {
    // Undecodable signature bytes are an invalid signature, not a malformed
    // request: the caller claimed a signature and it does not check out
    EcdsaSignature::from_hex(input).map_err(|e| ApiError::Auth(e.into()))
}
