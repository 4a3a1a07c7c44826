//! Cache Store Module
//!
//! Bounded cache engine combining HashMap storage with write-order eviction
//! and TTL expiration.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, WriteOrder};

/// Stale order records tolerated before the queue is compacted.
const ORDER_SLACK: usize = 64;

// == TTL Cache ==
/// Key-value cache holding at most `capacity` entries, each for at most `ttl`.
///
/// When a write pushes the cache past capacity, the entry whose latest write
/// is oldest is evicted. Lookups do not refresh an entry's position, so this
/// is first-in-first-out by write, not LRU.
///
/// The store is not synchronized; wrap it in [`SharedCache`](super::SharedCache)
/// to use it from concurrent request handlers.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Write-order queue for eviction
    order: WriteOrder<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime of every entry, in milliseconds
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache reading the system clock.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `ttl` - How long each entry stays valid after being written
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: WriteOrder::new(),
            stats: CacheStats::new(),
            capacity,
            ttl_ms: ttl.as_millis() as u64,
            clock,
        }
    }

    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// An expired entry is removed on the spot and counted as a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now, self.ttl_ms) => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(?key, "cache entry expired");
        }
        self.stats.record_miss();
        None
    }

    // == Put ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// Overwriting a key resets its expiry and moves it to the newest end of
    /// the write order. If the cache then holds more than `capacity` keys,
    /// oldest-written entries are evicted until it does not.
    pub fn put(&mut self, key: K, value: V) {
        let now = self.clock.now_ms();
        let seq = self.order.stamp(&key);
        self.entries.insert(key, CacheEntry::new(value, now, seq));

        while self.entries.len() > self.capacity {
            let entries = &self.entries;
            let oldest = self
                .order
                .pop_oldest(|k, seq| entries.get(k).is_some_and(|e| e.seq == seq));
            match oldest {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                    debug!(key = ?evicted, "cache entry evicted");
                }
                None => break,
            }
        }

        self.compact_order_if_needed();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now, ttl_ms));

        let removed = before - self.entries.len();
        if removed > 0 {
            let entries = &self.entries;
            self.order
                .compact(|k, seq| entries.get(k).is_some_and(|e| e.seq == seq));
        }
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Drops stale order records once they outnumber live entries.
    ///
    /// Lazily expired keys and overwrites leave records behind; without this
    /// a cache that never reaches capacity would grow its queue forever.
    fn compact_order_if_needed(&mut self) {
        if self.order.len() > self.entries.len() * 2 + ORDER_SLACK {
            let entries = &self.entries;
            self.order
                .compact(|k, seq| entries.get(k).is_some_and(|e| e.seq == seq));
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}
