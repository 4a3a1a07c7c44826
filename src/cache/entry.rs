//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A single cached value with its write metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Write timestamp (Unix milliseconds), never changed after creation
    pub stored_at: u64,
    /// Write-order stamp matching this entry's live record in the order queue
    pub seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, stored_at: u64, seq: u64) -> Self {
        Self {
            value,
            stored_at,
            seq,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was written.
    ///
    /// A clock that moved backwards yields an age of 0.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now` under `ttl_ms`.
    ///
    /// Boundary condition: an entry is expired once its age reaches the TTL,
    /// so a lookup exactly `ttl_ms` after the write is already a miss.
    pub fn is_expired(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) >= ttl_ms
    }
}
