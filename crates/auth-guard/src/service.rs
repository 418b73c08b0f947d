//! # Authorization Service (Pipeline)
//!
//! The composition point: canonicalize, verify the signature, check
//! freshness, check replay, and either admit the request or produce one of
//! the fixed rejection reasons. Terminal outcomes only; no retries inside
//! the pipeline.
//!
//! The pipeline performs no mutation until the replay store's atomic
//! record step; everything before it is a pure check, so an early
//! rejection leaves no trace.

use crate::domain::canonical::{legacy_message, typed_data};
use crate::domain::capability::Feature;
use crate::domain::config::AuthConfig;
use crate::domain::ecdsa::{personal_message_hash, verify_signer};
use crate::domain::entities::{Admitted, SignedRequest, SigningMethod};
use crate::domain::errors::AuthError;
use crate::domain::freshness::{self, Freshness};
use crate::domain::replay::{fingerprint, ReplayVerdict};
use crate::ports::inbound::AuthorizationApi;
use crate::ports::outbound::ReplayStore;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Authorization pipeline over an injected replay store.
///
/// The store handle is passed in at construction rather than held as a
/// process global, so tests can substitute a double with deterministic
/// TTL control.
pub struct AuthorizationService<S: ReplayStore> {
    config: AuthConfig,
    store: S,
}

impl<S: ReplayStore> AuthorizationService<S> {
    pub fn new(config: AuthConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pipeline against an explicit server clock, for deterministic tests.
    pub async fn authorize_request_at(
        &self,
        request: &SignedRequest,
        server_now_ms: i64,
    ) -> Result<Admitted, AuthError> {
        // Canonicalize + verify. Pure; failure leaves no trace.
        let digest = match request.method {
            SigningMethod::Legacy => {
                let message = legacy_message(&request.payload, request.timestamp_ms);
                personal_message_hash(&message)
            }
            SigningMethod::Eip712 => {
                // Typed-data mode requires the schema nonce, and the
                // timestamp must be representable as uint256
                let nonce = request.nonce.as_deref().ok_or(AuthError::InvalidSignature)?;
                let timestamp = u64::try_from(request.timestamp_ms)
                    .map_err(|_| AuthError::InvalidSignature)?;
                typed_data(&request.payload, timestamp, nonce, &self.config.domain)
                    .signing_digest()
            }
        };

        let signer = verify_signer(&digest, &request.signature, request.signer).map_err(|e| {
            debug!(signer = %request.signer, error = %e, "signature verification failed");
            AuthError::from(e)
        })?;

        // Freshness. Pure; driven by the caller's claimed timestamp.
        if let Freshness::Expired { ts_diff_ms } =
            freshness::check(request.timestamp_ms, server_now_ms, self.config.ttl_ms)
        {
            debug!(signer = %signer, ts_diff_ms, "request outside freshness window");
            return Err(AuthError::Expired { ts_diff_ms });
        }

        // Replay. The only mutating step, atomic per fingerprint; record
        // expiry runs on server wall time, not the claimed timestamp.
        let fp = fingerprint(&request.signature);
        let verdict = self
            .store
            .check_and_record(fp, Duration::from_millis(self.config.ttl_ms))
            .await
            .map_err(|e| {
                warn!(error = %e, "replay store unreachable, failing closed");
                AuthError::StoreUnavailable(e.to_string())
            })?;

        match verdict {
            ReplayVerdict::Accepted => {
                debug!(signer = %signer, "request admitted");
                Ok(Admitted {
                    signer,
                    fingerprint: fp,
                })
            }
            ReplayVerdict::AlreadyUsed => {
                warn!(signer = %signer, "replayed signature rejected");
                Err(AuthError::Replayed)
            }
        }
    }
}

/// Current wall-clock time in milliseconds since epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl<S: ReplayStore> AuthorizationApi for AuthorizationService<S> {
    async fn authorize_request(&self, request: &SignedRequest) -> Result<Admitted, AuthError> {
        self.authorize_request_at(request, now_ms()).await
    }

    fn authorize_capability(
        &self,
        provided_key: Option<&str>,
        feature: Feature,
    ) -> Result<(), AuthError> {
        self.config.capability.authorize(provided_key, feature)
    }
}
