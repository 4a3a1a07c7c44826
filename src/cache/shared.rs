//! Shared Cache Module
//!
//! Thread-safe handle around a [`TtlCache`] for use from request handlers.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, Clock, TtlCache};

// == Shared Cache ==
/// Cloneable handle to one cache instance.
///
/// Every operation takes the lock for the in-memory update only. Callers
/// fetch from the network between a missed `get` and the following `put`,
/// never while holding the lock. Two `put`s racing on one key both succeed;
/// the later one wins.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<TtlCache<K, V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
            ttl: self.ttl,
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a shared cache on the system clock.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::from_store(TtlCache::new(capacity, ttl))
    }

    /// Creates a shared cache reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::from_store(TtlCache::with_clock(capacity, ttl, clock))
    }

    /// Wraps an existing store.
    pub fn from_store(store: TtlCache<K, V>) -> Self {
        Self {
            capacity: store.capacity(),
            ttl: store.ttl(),
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // == Limits ==
    /// Capacity fixed at construction; reading it takes no lock.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Time-to-live fixed at construction.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns the fresh value for `key`, if any.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().await.get(key)
    }

    // == Put ==
    /// Stores `value` under `key`, evicting as needed.
    pub async fn put(&self, key: K, value: V) {
        self.inner.lock().await.put(key, value);
    }

    // == Length ==
    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    // == Purge Expired ==
    /// Removes expired entries, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.inner.lock().await.purge_expired()
    }
}
