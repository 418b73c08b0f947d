//! # Message Canonicalizer
//!
//! Deterministically serializes a request's domain fields plus timestamp
//! into exactly one of two canonical forms:
//!
//! - **Legacy**: the fields' string representations joined by `|`, with the
//!   timestamp always the final field. Signed as a personal message.
//! - **Typed data**: an EIP-712 domain separator plus a named, ordered
//!   field-type schema and a values record, with trailing `nonce` and
//!   `timestamp` fields.
//!
//! Both forms are pure functions of the request: identical inputs yield
//! byte-identical output, and changing any field (including the timestamp)
//! changes the output.

use crate::domain::ecdsa::keccak256;
use crate::domain::entities::OperationPayload;
use shared_types::{Address, Hash};

/// Field separator for the legacy canonical string.
pub const LEGACY_DELIMITER: char = '|';

/// EIP-712 domain, fixed per deployment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypedDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

/// One field of a typed-data schema: name and ABI type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedField {
    pub name: &'static str,
    pub type_name: &'static str,
}

/// A value bound to a schema field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedValue {
    String(String),
    Address(Address),
    Uint(u64),
}

/// Fully assembled typed-data message: domain, schema, and values in
/// schema order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedData {
    pub domain: TypedDomain,
    pub primary_type: &'static str,
    pub fields: Vec<TypedField>,
    pub values: Vec<TypedValue>,
}

/// Build the legacy canonical string: domain fields in declaration order,
/// then the timestamp, joined by [`LEGACY_DELIMITER`].
///
/// Addresses render as lowercase `0x`-prefixed hex.
pub fn legacy_message(payload: &OperationPayload, timestamp_ms: i64) -> String {
    let mut fields = field_strings(payload);
    fields.push(timestamp_ms.to_string());
    fields.join(&LEGACY_DELIMITER.to_string())
}

/// Build the typed-data message for one operation: schema fields in
/// declaration order plus trailing `nonce` (string) and `timestamp`
/// (uint256).
///
/// The timestamp is unsigned here: uint256 has no representation for a
/// negative value, so the caller converts (and rejects) before reaching the
/// encoder.
pub fn typed_data(
    payload: &OperationPayload,
    timestamp_ms: u64,
    nonce: &str,
    domain: &TypedDomain,
) -> TypedData {
    let (mut fields, mut values) = typed_fields(payload);
    fields.push(TypedField {
        name: "nonce",
        type_name: "string",
    });
    values.push(TypedValue::String(nonce.to_string()));
    fields.push(TypedField {
        name: "timestamp",
        type_name: "uint256",
    });
    values.push(TypedValue::Uint(timestamp_ms));

    TypedData {
        domain: domain.clone(),
        primary_type: payload.type_name(),
        fields,
        values,
    }
}

impl TypedData {
    /// The digest that gets signed: `keccak256(0x19 0x01 || domainSeparator
    /// || hashStruct(message))`.
    pub fn signing_digest(&self) -> Hash {
        let mut preimage = Vec::with_capacity(66);
        preimage.extend_from_slice(&[0x19, 0x01]);
        preimage.extend_from_slice(&self.domain.separator());
        preimage.extend_from_slice(&self.struct_hash());
        keccak256(&preimage)
    }

    /// `hashStruct(message)` = keccak256(typeHash || encodeData(values)).
    pub fn struct_hash(&self) -> Hash {
        let mut encoded = Vec::with_capacity(32 * (1 + self.values.len()));
        encoded.extend_from_slice(&keccak256(self.encode_type().as_bytes()));
        for value in &self.values {
            encoded.extend_from_slice(&encode_value(value));
        }
        keccak256(&encoded)
    }

    /// The type string, e.g.
    /// `LogPlay(string songId,address listenerAddress,...)`.
    pub fn encode_type(&self) -> String {
        let inner: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.type_name, f.name))
            .collect();
        format!("{}({})", self.primary_type, inner.join(","))
    }
}

impl TypedDomain {
    /// EIP-712 domain separator over
    /// `EIP712Domain(string name,string version,uint256 chainId,address
    /// verifyingContract)`.
    pub fn separator(&self) -> Hash {
        const DOMAIN_TYPE: &[u8] =
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

        let mut encoded = Vec::with_capacity(32 * 5);
        encoded.extend_from_slice(&keccak256(DOMAIN_TYPE));
        encoded.extend_from_slice(&keccak256(self.name.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.version.as_bytes()));
        encoded.extend_from_slice(&encode_uint(self.chain_id));
        encoded.extend_from_slice(&encode_address(&self.verifying_contract));
        keccak256(&encoded)
    }
}

/// Encode one value as its 32-byte EIP-712 data word.
fn encode_value(value: &TypedValue) -> [u8; 32] {
    match value {
        // Dynamic types are hashed
        TypedValue::String(s) => keccak256(s.as_bytes()),
        TypedValue::Address(addr) => encode_address(addr),
        TypedValue::Uint(n) => encode_uint(*n),
    }
}

/// Left-pad an address to 32 bytes.
fn encode_address(addr: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(addr.as_bytes());
    word
}

/// Big-endian uint256 word.
fn encode_uint(n: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&n.to_be_bytes());
    word
}

/// Ordered string representations of one operation's domain fields.
fn field_strings(payload: &OperationPayload) -> Vec<String> {
    match payload {
        OperationPayload::RegisterSong {
            id,
            artist_address,
            ipfs_hash,
            payment_model,
        } => vec![
            id.clone(),
            artist_address.to_string(),
            ipfs_hash.clone(),
            payment_model.clone(),
        ],
        OperationPayload::LogPlay {
            song_id,
            listener_address,
            amount,
            payment_type,
        } => vec![
            song_id.clone(),
            listener_address.to_string(),
            amount.clone(),
            payment_type.clone(),
        ],
        OperationPayload::CreateClaim {
            claim_id,
            claimant,
            song_id,
            amount,
        } => vec![
            claim_id.clone(),
            claimant.to_string(),
            song_id.clone(),
            amount.clone(),
        ],
    }
}

/// Ordered typed-data schema and values for one operation's domain fields
/// (without the trailing nonce/timestamp).
fn typed_fields(payload: &OperationPayload) -> (Vec<TypedField>, Vec<TypedValue>) {
    match payload {
        OperationPayload::RegisterSong {
            id,
            artist_address,
            ipfs_hash,
            payment_model,
        } => (
            vec![
                TypedField { name: "id", type_name: "string" },
                TypedField { name: "artistAddress", type_name: "address" },
                TypedField { name: "ipfsHash", type_name: "string" },
                TypedField { name: "paymentModel", type_name: "string" },
            ],
            vec![
                TypedValue::String(id.clone()),
                TypedValue::Address(*artist_address),
                TypedValue::String(ipfs_hash.clone()),
                TypedValue::String(payment_model.clone()),
            ],
        ),
        OperationPayload::LogPlay {
            song_id,
            listener_address,
            amount,
            payment_type,
        } => (
            vec![
                TypedField { name: "songId", type_name: "string" },
                TypedField { name: "listenerAddress", type_name: "address" },
                TypedField { name: "amount", type_name: "string" },
                TypedField { name: "paymentType", type_name: "string" },
            ],
            vec![
                TypedValue::String(song_id.clone()),
                TypedValue::Address(*listener_address),
                TypedValue::String(amount.clone()),
                TypedValue::String(payment_type.clone()),
            ],
        ),
        OperationPayload::CreateClaim {
            claim_id,
            claimant,
            song_id,
            amount,
        } => (
            vec![
                TypedField { name: "claimId", type_name: "string" },
                TypedField { name: "claimant", type_name: "address" },
                TypedField { name: "songId", type_name: "string" },
                TypedField { name: "amount", type_name: "string" },
            ],
            vec![
                TypedValue::String(claim_id.clone()),
                TypedValue::Address(*claimant),
                TypedValue::String(song_id.clone()),
                TypedValue::String(amount.clone()),
            ],
        ),
    }
}
