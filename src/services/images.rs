//! Image Fetcher
//!
//! Fetches album artwork from allow-listed hosts through the image cache.

use std::sync::Arc;

use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, Url};
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::error::{AppError, Result};

/// Content type assumed when upstream sends none.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Image bytes with the upstream content type.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Image cache keyed by source URL.
pub type ImageCache = SharedCache<String, CachedImage>;

#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http: reqwest::Client,
    cache: ImageCache,
    allowed_hosts: Arc<[String]>,
}

impl ImageFetcher {
    pub fn new(http: reqwest::Client, cache: ImageCache, allowed_hosts: Vec<String>) -> Self {
        Self {
            http,
            cache,
            allowed_hosts: allowed_hosts.into(),
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Checks that `raw` is an http(s) URL on an allow-listed host.
    ///
    /// A host matches an entry when equal to it or a subdomain of it, so
    /// `mzstatic.com` admits `is1-ssl.mzstatic.com`.
    pub fn validate_url(&self, raw: Option<&str>) -> Result<Url> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Missing image URL".to_string()))?;

        let url = Url::parse(raw)
            .map_err(|_| AppError::Validation("Invalid image URL".to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Validation("Invalid image URL".to_string()));
        }

        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        let allowed = self.allowed_hosts.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });
        if !allowed {
            return Err(AppError::Validation("Invalid image URL".to_string()));
        }

        Ok(url)
    }

    /// Returns the image at `raw_url`, from cache when fresh.
    pub async fn fetch(&self, raw_url: Option<&str>) -> Result<CachedImage> {
        let url = self.validate_url(raw_url)?;
        let key = url.as_str().to_string();

        if let Some(hit) = self.cache.get(&key).await {
            debug!(url = %key, "image cache hit");
            return Ok(hit);
        }

        let image = self.download(url).await.inspect_err(|err| {
            warn!(url = %key, error = %err, "image fetch failed");
        })?;

        self.cache.put(key, image.clone()).await;
        Ok(image)
    }

    async fn download(&self, url: Url) -> Result<CachedImage> {
        let response = self.http.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?;

        Ok(CachedImage {
            bytes,
            content_type,
        })
    }
}
