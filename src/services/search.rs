//! Search Fetcher
//!
//! Runs album searches against the upstream search endpoint, caching
//! successful results per normalized term.

use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::error::{AppError, Result};
use crate::models::SearchResult;

/// Search cache keyed by normalized term.
pub type SearchCache = SharedCache<String, Vec<SearchResult>>;

/// Normalizes a search term into its cache key: trimmed and lower-cased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct SearchFetcher {
    http: reqwest::Client,
    cache: SearchCache,
    search_url: String,
}

impl SearchFetcher {
    pub fn new(http: reqwest::Client, cache: SearchCache, search_url: impl Into<String>) -> Self {
        Self {
            http,
            cache,
            search_url: search_url.into(),
        }
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Returns results for `term`, from cache when fresh.
    ///
    /// Terms differing only in case or surrounding whitespace share one
    /// cache entry and one upstream call.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>> {
        let key = normalize_term(term);
        if key.is_empty() {
            return Err(AppError::Validation(
                "Please enter a search term".to_string(),
            ));
        }

        if let Some(hit) = self.cache.get(&key).await {
            debug!(term = %key, results = hit.len(), "search cache hit");
            return Ok(hit);
        }

        let results = self.query_upstream(&key).await.inspect_err(|err| {
            warn!(term = %key, error = %err, "upstream search failed");
        })?;

        self.cache.put(key, results.clone()).await;
        Ok(results)
    }

    async fn query_upstream(&self, term: &str) -> Result<Vec<SearchResult>> {
        let results = self
            .http
            .get(&self.search_url)
            .query(&[("term", term)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SearchResult>>()
            .await?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Stevie Wonder "), "stevie wonder");
        assert_eq!(normalize_term("MOTOWN"), "motown");
        assert_eq!(normalize_term(" \t\n"), "");
    }

    #[tokio::test]
    async fn test_blank_term_rejected_without_lookup() {
        let fetcher = SearchFetcher::new(
            reqwest::Client::new(),
            SharedCache::new(10, Duration::from_secs(60)),
            "http://127.0.0.1:9/search",
        );

        let result = fetcher.search("   ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(fetcher.cache().stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_cached_term_served_without_upstream() {
        let cache = SharedCache::new(10, Duration::from_secs(60));
        let result = SearchResult {
            title: "Abbey Road".to_string(),
            artist: "The Beatles".to_string(),
            price: 11.99,
            year: 1969,
            genre: "Rock".to_string(),
            image_url: "https://is1-ssl.mzstatic.com/a.jpg".to_string(),
        };
        cache.put("beatles".to_string(), vec![result.clone()]).await;

        // Port 9 (discard) would fail any real request
        let fetcher = SearchFetcher::new(reqwest::Client::new(), cache, "http://127.0.0.1:9/search");

        assert_eq!(fetcher.search(" Beatles ").await.unwrap(), vec![result]);
    }
}
