//! Write Order Module
//!
//! Tracks the order in which keys were written, for oldest-first eviction.

use std::collections::VecDeque;

// == Write Order ==
/// Queue of `(key, seq)` records in write order.
///
/// - Front = oldest write
/// - Back = newest write
///
/// Every write pushes a fresh record with a new sequence number. A record is
/// current only while the cache entry for its key still carries the same
/// `seq`; overwritten or removed keys leave stale records behind, which are
/// skipped on eviction and dropped by [`WriteOrder::compact`]. This keeps
/// both writes and evictions O(1) amortized.
#[derive(Debug)]
pub struct WriteOrder<K> {
    queue: VecDeque<(K, u64)>,
    next_seq: u64,
}

impl<K> Default for WriteOrder<K> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            next_seq: 0,
        }
    }
}

impl<K: Clone> WriteOrder<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Stamp ==
    /// Records a write of `key` at the back of the queue.
    ///
    /// Returns the sequence number the caller must store with the entry.
    pub fn stamp(&mut self, key: &K) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push_back((key.clone(), seq));
        seq
    }

    // == Pop Oldest ==
    /// Removes records from the front until one is still current.
    ///
    /// `is_current(key, seq)` must report whether the cache entry for `key`
    /// was written with `seq`. Returns None once the queue runs dry.
    pub fn pop_oldest<F>(&mut self, mut is_current: F) -> Option<K>
    where
        F: FnMut(&K, u64) -> bool,
    {
        while let Some((key, seq)) = self.queue.pop_front() {
            if is_current(&key, seq) {
                return Some(key);
            }
        }
        None
    }

    // == Compact ==
    /// Drops every stale record, keeping current ones in order.
    pub fn compact<F>(&mut self, mut is_current: F)
    where
        F: FnMut(&K, u64) -> bool,
    {
        self.queue.retain(|(key, seq)| is_current(key, *seq));
    }

    // == Length ==
    /// Number of records, stale ones included.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_order_new() {
        let order: WriteOrder<String> = WriteOrder::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
    }

    #[test]
    fn test_stamp_increments_seq() {
        let mut order = WriteOrder::new();

        assert_eq!(order.stamp(&"a"), 0);
        assert_eq!(order.stamp(&"b"), 1);
        assert_eq!(order.stamp(&"a"), 2);
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn test_pop_oldest_in_write_order() {
        let mut order = WriteOrder::new();
        let live: HashMap<&str, u64> = ["a", "b", "c"]
            .into_iter()
            .map(|k| (k, order.stamp(&k)))
            .collect();

        let is_current = |k: &&str, seq: u64| live.get(k) == Some(&seq);
        assert_eq!(order.pop_oldest(is_current), Some("a"));
        assert_eq!(order.pop_oldest(is_current), Some("b"));
        assert_eq!(order.pop_oldest(is_current), Some("c"));
        assert_eq!(order.pop_oldest(is_current), None);
    }

    #[test]
    fn test_pop_oldest_skips_stale_records() {
        let mut order = WriteOrder::new();
        let mut live = HashMap::new();

        live.insert("a", order.stamp(&"a"));
        live.insert("b", order.stamp(&"b"));
        // Rewrite of "a" supersedes its first record
        live.insert("a", order.stamp(&"a"));

        let is_current = |k: &&str, seq: u64| live.get(k) == Some(&seq);
        assert_eq!(order.pop_oldest(is_current), Some("b"));
        assert_eq!(order.pop_oldest(is_current), Some("a"));
        assert!(order.is_empty());
    }

    #[test]
    fn test_pop_oldest_skips_removed_keys() {
        let mut order = WriteOrder::new();
        let mut live = HashMap::new();

        live.insert("a", order.stamp(&"a"));
        live.insert("b", order.stamp(&"b"));
        live.remove("a");

        let is_current = |k: &&str, seq: u64| live.get(k) == Some(&seq);
        assert_eq!(order.pop_oldest(is_current), Some("b"));
    }

    #[test]
    fn test_compact_drops_stale_records() {
        let mut order = WriteOrder::new();
        let mut live = HashMap::new();

        for _ in 0..5 {
            live.insert("hot", order.stamp(&"hot"));
        }
        live.insert("cold", order.stamp(&"cold"));
        assert_eq!(order.len(), 6);

        order.compact(|k: &&str, seq| live.get(k) == Some(&seq));
        assert_eq!(order.len(), 2);

        let is_current = |k: &&str, seq: u64| live.get(k) == Some(&seq);
        assert_eq!(order.pop_oldest(is_current), Some("hot"));
        assert_eq!(order.pop_oldest(is_current), Some("cold"));
    }
}
