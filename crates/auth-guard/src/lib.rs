//! # Request Authorization Subsystem
//!
//! Signature-based request authorization and replay protection for
//! mutating API calls (song registration, play logging, claim creation).
//! The API keeps no server-side session state: every mutating request
//! carries a signature over its own canonical form, and this subsystem
//! decides whether the caller is the claimed signer and whether the
//! request is fresh and unused.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure canonicalization, cryptography,
//!   freshness and capability logic. No I/O.
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound
//!   interfaces.
//! - **Adapters Layer** (`adapters/`): In-memory replay store.
//! - **Service Layer** (`service.rs`): The authorization pipeline wiring
//!   domain logic to ports.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are
//!   rejected.
//! - **Constant-Time Comparisons**: Recovered addresses and admin keys are
//!   compared in constant time.
//! - **Replay Protection**: The check-and-record step against the replay
//!   store is atomic; for the same signature submitted concurrently, exactly
//!   one caller is admitted.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::memory_store::{MemoryReplayStore, DEFAULT_SWEEP_INTERVAL};
pub use domain::canonical::{legacy_message, typed_data, TypedData, TypedDomain};
pub use domain::capability::{AdminCapability, Feature};
pub use domain::config::{AuthConfig, ConfigError};
pub use domain::entities::{
    Admitted, EcdsaSignature, OperationPayload, SignedRequest, SigningMethod,
};
pub use domain::errors::{AuthError, SignatureError};
pub use domain::freshness::Freshness;
pub use domain::replay::{fingerprint, ReplayVerdict};
pub use ports::inbound::AuthorizationApi;
pub use ports::outbound::{ReplayStore, ReplayStoreError};
pub use service::{now_ms, AuthorizationService};
