//! Search result models
//!
//! Records returned by the upstream album search, as cached and as served.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::album::Genre;

/// Route serving cached artwork.
pub const IMAGE_PROXY_PATH: &str = "/api/image-proxy";

/// Points upstream artwork at the image proxy, upscaled to 300x300.
pub fn proxied_image_url(image_url: &str) -> String {
    let upscaled = image_url.replace("100x100bb.jpg", "300x300bb.jpg");
    let encoded: String = form_urlencoded::byte_serialize(upscaled.as_bytes()).collect();
    format!("{}?url={}", IMAGE_PROXY_PATH, encoded)
}

/// One upstream search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub year: i32,
    /// Upstream genre label, free-form
    pub genre: String,
    pub image_url: String,
}

/// A search hit as returned to clients, with the store genre it maps to
/// and its artwork routed through the image proxy.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub result: SearchResult,
    pub suggested_genre: Genre,
    pub proxied_image_url: String,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        let suggested_genre = Genre::from_upstream(&result.genre);
        let proxied_image_url = proxied_image_url(&result.image_url);
        Self {
            result,
            suggested_genre,
            proxied_image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_serializes_flat() {
        let hit = SearchHit::from(SearchResult {
            title: "Thriller".to_string(),
            artist: "Michael Jackson".to_string(),
            price: 9.99,
            year: 1982,
            genre: "Pop".to_string(),
            image_url: "https://is1-ssl.mzstatic.com/a/100x100bb.jpg".to_string(),
        });

        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["title"], "Thriller");
        assert_eq!(json["image_url"], "https://is1-ssl.mzstatic.com/a/100x100bb.jpg");
        assert_eq!(json["suggested_genre"], "Pop");
        assert_eq!(
            json["proxied_image_url"],
            "/api/image-proxy?url=https%3A%2F%2Fis1-ssl.mzstatic.com%2Fa%2F300x300bb.jpg"
        );
    }

    #[test]
    fn test_proxied_image_url_keeps_other_sizes() {
        assert_eq!(
            proxied_image_url("https://is1-ssl.mzstatic.com/a/600x600bb.jpg?x=1&y=2"),
            "/api/image-proxy?url=https%3A%2F%2Fis1-ssl.mzstatic.com%2Fa%2F600x600bb.jpg%3Fx%3D1%26y%3D2"
        );
    }
}
