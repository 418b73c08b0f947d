//! # Domain Entities
//!
//! Core data structures for request authorization. `SignedRequest` and the
//! canonical forms derived from it are ephemeral: they live for one
//! request's processing and hold no mutable state of their own.

use crate::domain::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{decode_hex, Address, Hash};

/// Signing scheme selected by the caller.
///
/// `Legacy` is the default: a `|`-delimited string signed as a personal
/// message. `Eip712` binds the signature to a typed-data schema and a
/// domain separator, preventing cross-application reuse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMethod {
    #[default]
    Legacy,
    Eip712,
}

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse a 65-byte `r || s || v` signature from a hex string
    /// (`0x` prefix optional).
    pub fn from_hex(input: &str) -> Result<Self, SignatureError> {
        let raw = decode_hex(input).map_err(|_| SignatureError::InvalidFormat)?;
        if raw.len() != 65 {
            return Err(SignatureError::InvalidFormat);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&raw[..32]);
        s.copy_from_slice(&raw[32..64]);
        Ok(Self { r, s, v: raw[64] })
    }

    /// The raw 65 bytes `r || s || v`.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// Domain fields of one signed operation.
///
/// The field order inside each variant is load-bearing: the legacy
/// canonical form concatenates fields in exactly this order, and any
/// signer must do the same or verification fails by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationPayload {
    /// Register a song in the catalog.
    RegisterSong {
        id: String,
        artist_address: Address,
        ipfs_hash: String,
        payment_model: String,
    },
    /// Log one play of a song.
    LogPlay {
        song_id: String,
        listener_address: Address,
        amount: String,
        payment_type: String,
    },
    /// Create an earnings claim.
    CreateClaim {
        claim_id: String,
        claimant: Address,
        song_id: String,
        amount: String,
    },
}

impl OperationPayload {
    /// EIP-712 primary type name for this operation.
    pub fn type_name(&self) -> &'static str {
        match self {
            OperationPayload::RegisterSong { .. } => "RegisterSong",
            OperationPayload::LogPlay { .. } => "LogPlay",
            OperationPayload::CreateClaim { .. } => "CreateClaim",
        }
    }
}

/// The unit of work submitted by a caller.
///
/// The domain fields and timestamp together are exactly what was
/// canonicalized and signed; altering any field after signing changes the
/// canonical message and the recovered address no longer matches.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    /// Operation-specific domain fields.
    pub payload: OperationPayload,
    /// Claimed signer address.
    pub signer: Address,
    /// Signature over the canonical message.
    pub signature: EcdsaSignature,
    /// Caller-supplied timestamp, milliseconds since epoch.
    pub timestamp_ms: i64,
    /// Selected signing scheme.
    pub method: SigningMethod,
    /// Schema nonce, required for typed-data mode.
    pub nonce: Option<String>,
}

/// Terminal accept outcome of the authorization pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admitted {
    /// The verified signer (equals the claimed signer).
    pub signer: Address,
    /// Fingerprint recorded in the replay store.
    pub fingerprint: Hash,
}
