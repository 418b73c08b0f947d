//! # Authorization Errors
//!
//! Two layers of errors: `SignatureError` is the cryptographic detail kept
//! inside the domain, `AuthError` is the pipeline's externally documented
//! taxonomy. Every `AuthError` maps to one stable machine-readable reason
//! string; none of these propagate as panics.

use crate::domain::capability::Feature;
use shared_types::Address;
use thiserror::Error;

/// Errors that can occur during signature verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, invalid encoding,
    /// scalar out of range)
    #[error("invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("failed to recover public key")]
    RecoveryFailed,

    /// Recovery produced the zero address
    #[error("recovered zero address")]
    ZeroAddress,

    /// Recovered signer does not match claimed signer
    #[error("signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch { expected: Address, actual: Address },
}

/// Terminal rejection reasons of the authorization pipeline.
///
/// A caller who receives `Expired` must re-sign with a fresh timestamp (a
/// new signature, not a retry of the old one); a caller who receives
/// `Replayed` must not retry at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed signature bytes or recovered signer does not match claim
    #[error("invalid signature")]
    InvalidSignature,

    /// Timestamp outside the TTL window, in either direction.
    /// `ts_diff_ms` is `server_now - claimed` (positive = stale,
    /// negative = future-dated); surfaced for debuggability only.
    #[error("request expired (ts_diff_ms: {ts_diff_ms})")]
    Expired { ts_diff_ms: i64 },

    /// Signature fingerprint already recorded
    #[error("signature already used")]
    Replayed,

    /// Admin key missing or mismatched
    #[error("admin capability denied")]
    CapabilityDenied,

    /// Feature flag off, independent of any key
    #[error("feature disabled: {feature:?}")]
    FeatureDisabled { feature: Feature },

    /// The replay store is unreachable; the pipeline fails closed
    #[error("replay store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Stable machine-readable reason string for the wire.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired { .. } => "expired",
            AuthError::Replayed => "replayed",
            AuthError::CapabilityDenied => "forbidden",
            AuthError::FeatureDisabled {
                feature: Feature::Uploads,
            } => "uploads_disabled",
            AuthError::FeatureDisabled { .. } => "feature_disabled",
            AuthError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<SignatureError> for AuthError {
    /// Cryptographic detail is collapsed to a single outward reason so the
    /// rejection does not disclose which check failed.
    fn from(_: SignatureError) -> Self {
        AuthError::InvalidSignature
    }
}
