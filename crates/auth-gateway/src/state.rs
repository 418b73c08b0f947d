//! Application state shared across handlers.
//!
//! The catalog here is a deliberately thin in-memory registry: enough to
//! demonstrate the authorization verdicts end to end. Persistence is an
//! external collaborator, not part of this service.

use auth_guard::{AuthConfig, AuthorizationService, MemoryReplayStore};
use dashmap::DashMap;
use serde::Serialize;
use shared_types::Address;
use std::sync::Arc;

/// A registered song.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    pub id: String,
    pub title: Option<String>,
    pub artist_address: Address,
    pub ipfs_hash: String,
    pub payment_model: String,
    pub plays: u64,
    pub registered_at_ms: i64,
}

/// A recorded earnings claim.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub claim_id: String,
    pub claimant: Address,
    pub song_id: String,
    pub amount: String,
    pub created_at_ms: i64,
}

/// Shared application state.
pub struct AppState {
    pub auth: AuthorizationService<Arc<MemoryReplayStore>>,
    pub replay_store: Arc<MemoryReplayStore>,
    pub songs: DashMap<String, SongRecord>,
    pub claims: DashMap<String, ClaimRecord>,
}

impl AppState {
    pub fn new(config: AuthConfig) -> Arc<Self> {
        let replay_store = Arc::new(MemoryReplayStore::new());
        Arc::new(Self {
            auth: AuthorizationService::new(config, Arc::clone(&replay_store)),
            replay_store,
            songs: DashMap::new(),
            claims: DashMap::new(),
        })
    }
}
