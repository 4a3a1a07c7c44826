//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the remote album API
    pub album_api_url: String,
    /// Full URL of the upstream album search endpoint
    pub search_api_url: String,
    /// Timeout for every upstream request, in milliseconds
    pub api_timeout_ms: u64,
    /// Hosts (and their subdomains) the image proxy may fetch from
    pub image_allowed_hosts: Vec<String>,
    /// Image cache entry lifetime, in milliseconds
    pub image_cache_ttl_ms: u64,
    /// Maximum number of cached images
    pub image_cache_capacity: usize,
    /// Search cache entry lifetime, in milliseconds
    pub search_cache_ttl_ms: u64,
    /// Maximum number of cached search terms
    pub search_cache_capacity: usize,
    /// Background purge task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ALBUM_API_URL` - Album API base URL (default: http://localhost:8080)
    /// - `SEARCH_API_URL` - Search endpoint (default: http://localhost:8080/search)
    /// - `API_TIMEOUT_MS` - Upstream request timeout (default: 10000)
    /// - `IMAGE_ALLOWED_HOSTS` - Comma-separated host allow-list (default: mzstatic.com)
    /// - `IMAGE_CACHE_TTL_MS` - Image cache TTL (default: 86400000, 24h)
    /// - `IMAGE_CACHE_CAPACITY` - Image cache entries (default: 1000)
    /// - `SEARCH_CACHE_TTL_MS` - Search cache TTL (default: 600000, 10 min)
    /// - `SEARCH_CACHE_CAPACITY` - Search cache entries (default: 100)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            album_api_url: env::var("ALBUM_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.album_api_url),
            search_api_url: env::var("SEARCH_API_URL").unwrap_or(defaults.search_api_url),
            api_timeout_ms: parse_var("API_TIMEOUT_MS").unwrap_or(defaults.api_timeout_ms),
            image_allowed_hosts: env::var("IMAGE_ALLOWED_HOSTS")
                .ok()
                .map(|v| parse_host_list(&v))
                .filter(|hosts| !hosts.is_empty())
                .unwrap_or(defaults.image_allowed_hosts),
            image_cache_ttl_ms: parse_var("IMAGE_CACHE_TTL_MS")
                .unwrap_or(defaults.image_cache_ttl_ms),
            image_cache_capacity: parse_var("IMAGE_CACHE_CAPACITY")
                .unwrap_or(defaults.image_cache_capacity),
            search_cache_ttl_ms: parse_var("SEARCH_CACHE_TTL_MS")
                .unwrap_or(defaults.search_cache_ttl_ms),
            search_cache_capacity: parse_var("SEARCH_CACHE_CAPACITY")
                .unwrap_or(defaults.search_cache_capacity),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    pub fn image_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.image_cache_ttl_ms)
    }

    pub fn search_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.search_cache_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            album_api_url: "http://localhost:8080".to_string(),
            search_api_url: "http://localhost:8080/search".to_string(),
            api_timeout_ms: 10_000,
            image_allowed_hosts: vec!["mzstatic.com".to_string()],
            image_cache_ttl_ms: 24 * 60 * 60 * 1000,
            image_cache_capacity: 1000,
            search_cache_ttl_ms: 10 * 60 * 1000,
            search_cache_capacity: 100,
            cleanup_interval: 60,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}
