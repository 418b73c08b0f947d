//! Client-side signing fixtures.
//!
//! The production crates only ever verify; these helpers play the wallet's
//! role so the suite can produce genuine signatures over canonical forms,
//! normalized to low S the way wallets emit them.

use auth_guard::domain::ecdsa::{address_from_pubkey, personal_message_hash};
use auth_guard::{
    legacy_message, typed_data, AuthConfig, EcdsaSignature, OperationPayload, SignedRequest,
    SigningMethod, TypedDomain,
};
use auth_gateway::{app, AppState};
use axum::Router;
use k256::ecdsa::SigningKey;
use shared_types::{Address, Hash};
use std::sync::Arc;

/// Generate a fresh keypair plus its derived address.
pub fn generate_signer() -> (SigningKey, Address) {
    let signing_key = SigningKey::random(&mut rand::thread_rng());
    let address = address_from_pubkey(signing_key.verifying_key());
    (signing_key, address)
}

/// Sign a 32-byte digest, normalizing to low S.
pub fn sign_digest(digest: &Hash, key: &SigningKey) -> EcdsaSignature {
    let (sig, recid) = key
        .sign_prehash_recoverable(digest)
        .expect("signing failed");

    // normalize_s returns Some only when S was in the upper half; flipping
    // S flips the recovery id with it
    let (sig, v) = match sig.normalize_s() {
        Some(normalized) => (normalized, (recid.to_byte() ^ 1) + 27),
        None => (sig, recid.to_byte() + 27),
    };

    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    EcdsaSignature { r, s, v }
}

/// Sign a string the way a wallet's `personal_sign` does.
pub fn sign_personal(message: &str, key: &SigningKey) -> EcdsaSignature {
    sign_digest(&personal_message_hash(message), key)
}

/// Build a legacy-mode signed request over `payload`.
pub fn signed_legacy(
    payload: OperationPayload,
    timestamp_ms: i64,
    key: &SigningKey,
    signer: Address,
) -> SignedRequest {
    let message = legacy_message(&payload, timestamp_ms);
    SignedRequest {
        payload,
        signer,
        signature: sign_personal(&message, key),
        timestamp_ms,
        method: SigningMethod::Legacy,
        nonce: None,
    }
}

/// Build a typed-data signed request over `payload`.
pub fn signed_typed(
    payload: OperationPayload,
    timestamp_ms: i64,
    nonce: &str,
    domain: &TypedDomain,
    key: &SigningKey,
    signer: Address,
) -> SignedRequest {
    let ts = u64::try_from(timestamp_ms).expect("timestamp must be non-negative");
    let digest = typed_data(&payload, ts, nonce, domain).signing_digest();
    SignedRequest {
        payload,
        signer,
        signature: sign_digest(&digest, key),
        timestamp_ms,
        method: SigningMethod::Eip712,
        nonce: Some(nonce.to_string()),
    }
}

/// Hex-encode a signature the way clients submit it on the wire.
pub fn signature_hex(signature: &EcdsaSignature) -> String {
    format!("0x{}", hex::encode(signature.to_bytes()))
}

/// Fresh gateway router plus its state, for oneshot HTTP tests.
pub fn test_app(config: AuthConfig) -> (Router, Arc<AppState>) {
    let state = AppState::new(config);
    (app(Arc::clone(&state)), state)
}
