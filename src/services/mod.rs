//! Upstream Services
//!
//! Network-facing collaborators of the caches: the image fetcher, the album
//! search fetcher, and the pass-through album API client.
//!
//! Each fetcher checks its cache, releases the lock, awaits the network, then
//! stores only successful results. Failed fetches are never cached.

pub mod albums;
pub mod images;
pub mod search;

use std::time::Duration;

pub use albums::AlbumClient;
pub use images::{CachedImage, ImageFetcher};
pub use search::{normalize_term, SearchFetcher};

/// Browser User-Agent sent upstream; some image CDNs refuse bare clients.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Builds the HTTP client shared by all upstream services.
///
/// # Features
/// - **Timeouts**: `timeout` per request, connect capped at the same value
/// - **Connection pooling**: one pool reused across services
/// - **Security**: Rustls for TLS
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(build_http_client(Duration::from_secs(10)).is_ok());
    }
}
