//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration and oldest-write eviction.

mod clock;
mod entry;
mod order;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use entry::CacheEntry;
pub use order::WriteOrder;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::TtlCache;
