//! # Replay Fingerprinting
//!
//! A verified signature is fingerprinted and recorded in a TTL-bounded
//! store; any later attempt bearing the same signature hits the record and
//! is rejected. The record's expiry equals the freshness TTL: past that
//! window the freshness check rejects the request first, so the two checks
//! are complementary. The freshness clock is the caller's claimed
//! timestamp; the replay record's clock is server wall time at
//! verification, which closes the gap a clock-skewed caller could
//! otherwise exploit.

use crate::domain::ecdsa::keccak256;
use crate::domain::entities::EcdsaSignature;
use shared_types::Hash;

/// Outcome of the atomic check-and-record against the replay store.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayVerdict {
    Accepted,
    AlreadyUsed,
}

/// Fingerprint of a signature: keccak256 over the raw 65 bytes.
///
/// Hashing gives the store a fixed-size key and keeps signature material
/// out of it.
pub fn fingerprint(signature: &EcdsaSignature) -> Hash {
    keccak256(&signature.to_bytes())
}
