//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the authorization subsystem needs: a key-value store with
//! an atomic TTL-bounded "record if absent" primitive. An in-memory map or
//! an external cache service both satisfy this.

use crate::domain::replay::ReplayVerdict;
use shared_types::Hash;
use std::time::Duration;
use thiserror::Error;

/// Error from the replay store.
///
/// The store being unreachable is the one fatal condition in this
/// subsystem; the pipeline maps it to a rejection (fail closed) rather
/// than skipping replay protection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayStoreError {
    /// The backing store is unreachable
    #[error("replay store unavailable: {0}")]
    Unavailable(String),
}

/// TTL-bounded replay record store.
#[async_trait::async_trait]
pub trait ReplayStore: Send + Sync {
    /// Atomically record `fingerprint` if absent.
    ///
    /// For the same fingerprint submitted concurrently, exactly one caller
    /// observes `Accepted`; every other caller observes `AlreadyUsed`.
    /// Records expire on their own after `ttl`; the store owns eviction.
    async fn check_and_record(
        &self,
        fingerprint: Hash,
        ttl: Duration,
    ) -> Result<ReplayVerdict, ReplayStoreError>;
}

// A shared handle to a store is itself a store; the pipeline and the
// eviction sweeper can hold the same instance.
#[async_trait::async_trait]
impl<T: ReplayStore + ?Sized> ReplayStore for std::sync::Arc<T> {
    async fn check_and_record(
        &self,
        fingerprint: Hash,
        ttl: Duration,
    ) -> Result<ReplayVerdict, ReplayStoreError> {
        (**self).check_and_record(fingerprint, ttl).await
    }
}
