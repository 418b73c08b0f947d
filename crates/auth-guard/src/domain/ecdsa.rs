//! # Signature Verifier (secp256k1)
//!
//! Recovers the signer address from an ECDSA signature and compares it to
//! the claim. This is the only module touching asymmetric cryptography.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be strictly less than half
//!   the curve order.
//! - **Scalar Range Validation**: R and S must be in [1, n-1].
//! - **Constant-Time Address Comparison**: the recovered address is compared
//!   to the claim with `subtle`, never byte-by-byte with early exit.
//! - Malformed input is an error value, never a panic.

use crate::domain::entities::EcdsaSignature;
use crate::domain::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n.
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for the malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Personal-message digest: `keccak256("\x19Ethereum Signed Message:\n" ||
/// len(message) || message)`.
///
/// This is what browser wallets sign for `personal_sign`, so legacy-mode
/// signatures produced client-side verify directly.
pub fn personal_message_hash(message: &str) -> Hash {
    let mut preimage =
        Vec::with_capacity(26 + 20 + message.len());
    preimage.extend_from_slice(b"\x19Ethereum Signed Message:\n");
    preimage.extend_from_slice(message.len().to_string().as_bytes());
    preimage.extend_from_slice(message.as_bytes());
    keccak256(&preimage)
}

/// Recover the signer address for `digest` and require that it matches the
/// claimed signer.
///
/// All failure modes (malformed scalars, high S, bad recovery id, recovery
/// failure, zero address, mismatch) come back as a `SignatureError`; the
/// pipeline collapses them to one outward reason.
pub fn verify_signer(
    digest: &Hash,
    signature: &EcdsaSignature,
    claimed: Address,
) -> Result<Address, SignatureError> {
    let recovered = recover_address(digest, signature)?;

    if recovered.is_zero() {
        return Err(SignatureError::ZeroAddress);
    }

    if !addresses_match(&recovered, &claimed) {
        return Err(SignatureError::SignerMismatch {
            expected: claimed,
            actual: recovered,
        });
    }

    Ok(recovered)
}

/// Recover the signer's address from a signature over `digest`.
///
/// Validations performed before recovery:
/// 1. R and S are in [1, n-1]
/// 2. S is in the lower half of the curve order (EIP-2)
/// 3. Recovery ID is 0, 1, 27, or 28
pub fn recover_address(
    digest: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = match Signature::from_slice(&sig_bytes) {
        Ok(s) => {
            sig_bytes.zeroize();
            s
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(SignatureError::InvalidFormat);
        }
    };

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Derive the account address from a public key: last 20 bytes of
/// keccak256 over the uncompressed key without the 0x04 prefix.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}

/// Constant-time address equality.
fn addresses_match(a: &Address, b: &Address) -> bool {
    a.as_bytes().as_slice().ct_eq(b.as_bytes().as_slice()).into()
}

/// Check that S is strictly less than half the curve order (EIP-2).
///
/// Constant-time: the comparison runs in fixed time regardless of input
/// values.
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER)
}

/// Check that a scalar is in [1, n-1]. Constant-time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let less = Choice::from(ct_less_than(scalar, &SECP256K1_ORDER) as u8);
    (!is_zero & less).into()
}

/// Constant-time big-endian `a < b` over 32-byte values: no early return,
/// the decision accumulates in `Choice` flags.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Parse recovery ID from a v value. Valid: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// `n - s`, used to build high-S counterexamples in tests.
#[cfg(test)]
fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
