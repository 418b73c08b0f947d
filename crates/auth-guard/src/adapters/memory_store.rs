//! # In-Memory Replay Store
//!
//! `DashMap`-backed implementation of the `ReplayStore` port. The
//! check-and-record step goes through the map's `entry` API, which holds
//! the shard write lock for the duration of the decision: for one
//! fingerprint submitted concurrently, exactly one caller wins the insert.
//!
//! Expired records are replaced lazily on collision and reaped by a
//! periodic sweep so the map does not grow without bound between
//! collisions.

use crate::domain::replay::ReplayVerdict;
use crate::ports::outbound::{ReplayStore, ReplayStoreError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default interval between eviction sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// In-memory TTL-keyed replay record store.
#[derive(Debug, Default)]
pub struct MemoryReplayStore {
    /// Fingerprint -> expiry instant
    records: DashMap<Hash, Instant>,
}

impl MemoryReplayStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of live (possibly expired, not yet swept) records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check-and-record against an explicit `now`, for deterministic TTL
    /// control in tests.
    fn check_and_record_at(&self, fingerprint: Hash, ttl: Duration, now: Instant) -> ReplayVerdict {
        match self.records.entry(fingerprint) {
            Entry::Occupied(mut occupied) => {
                if now < *occupied.get() {
                    ReplayVerdict::AlreadyUsed
                } else {
                    // Record expired; the same fingerprint is past the
                    // freshness window anyway, so re-admitting is sound
                    occupied.insert(now + ttl);
                    ReplayVerdict::Accepted
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(now + ttl);
                ReplayVerdict::Accepted
            }
        }
    }

    /// Drop every expired record.
    pub fn sweep(&self) {
        let now = Instant::now();
        // retain locks shards one at a time, so concurrent inserts can land
        // in already-scanned shards mid-sweep; count removals in the closure
        // instead of diffing len() around the call
        let evicted = AtomicUsize::new(0);
        self.records.retain(|_, expiry| {
            let live = now < *expiry;
            if !live {
                evicted.fetch_add(1, Ordering::Relaxed);
            }
            live
        });
        let evicted = evicted.into_inner();
        if evicted > 0 {
            debug!(evicted, remaining = self.records.len(), "replay store sweep");
        }
    }

    /// Spawn the periodic eviction sweep.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                store.sweep();
            }
        })
    }
}

#[async_trait::async_trait]
impl ReplayStore for MemoryReplayStore {
    async fn check_and_record(
        &self,
        fingerprint: Hash,
        ttl: Duration,
    ) -> Result<ReplayVerdict, ReplayStoreError> {
        Ok(self.check_and_record_at(fingerprint, ttl, Instant::now()))
    }
}
