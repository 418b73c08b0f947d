//! Errors for wire-type parsing.

use thiserror::Error;

/// Errors that can occur while parsing wire-level primitives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Not a 20-byte hex address
    #[error("invalid address")]
    InvalidAddress,

    /// Not decodable as hex
    #[error("invalid hex string")]
    InvalidHex,
}
