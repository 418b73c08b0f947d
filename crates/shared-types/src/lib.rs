//! # Shared Types Crate
//!
//! Cross-crate primitives for the Mycelix Music auth stack.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, hashes, and hex wire helpers
//!   live here; every other crate imports them rather than redefining them.
//! - **Wire-friendly**: `Address` serializes as a `0x`-prefixed hex string,
//!   matching what browser wallets put on the wire.

pub mod address;
pub mod errors;

pub use address::Address;
pub use errors::TypeError;

/// 32-byte hash (keccak256 output).
pub type Hash = [u8; 32];

/// Decode a hex string with optional `0x` prefix into bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, TypeError> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(stripped).map_err(|_| TypeError::InvalidHex)
}
