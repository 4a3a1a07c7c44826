//! Expiry Purge Task
//!
//! Background task that periodically removes expired entries from the image
//! and search caches. Lookups already treat expired entries as misses; this
//! only releases their memory early.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a background task that purges expired entries from both caches.
///
/// Each cache lock is held only for its own purge.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(state: AppState, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache purge task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let images = state.images.cache().purge_expired().await;
            let search = state.search.cache().purge_expired().await;

            if images + search > 0 {
                info!(images, search, "Cache purge: removed expired entries");
            } else {
                debug!("Cache purge: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state_with_ttl(ttl_ms: u64) -> AppState {
        let config = Config {
            image_cache_ttl_ms: ttl_ms,
            search_cache_ttl_ms: ttl_ms,
            ..Config::default()
        };
        AppState::with_client(&config, reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let state = state_with_ttl(200);
        state
            .search
            .cache()
            .put("expire soon".to_string(), Vec::new())
            .await;

        let handle = spawn_cleanup_task(state.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Purged physically, not just hidden from lookups
        assert_eq!(state.search.cache().len().await, 0);
        assert_eq!(state.search.cache().stats().await.expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let state = state_with_ttl(3_600_000);
        state
            .search
            .cache()
            .put("long lived".to_string(), Vec::new())
            .await;

        let handle = spawn_cleanup_task(state.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(state.search.cache().len().await, 1);
        assert_eq!(
            state.search.cache().get(&"long lived".to_string()).await,
            Some(Vec::new())
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(state_with_ttl(1_000), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
