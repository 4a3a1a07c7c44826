//! Domain models and API DTOs
//!
//! Album and search records plus the request/response bodies used by the
//! HTTP endpoints.

pub mod album;
pub mod requests;
pub mod responses;
pub mod search;

// Re-export commonly used types
pub use album::{Album, AlbumDraft, AlbumInput, Genre};
pub use requests::{ImageProxyQuery, ListAlbumsQuery, SearchQuery};
pub use responses::{CacheStatsResponse, DeleteResponse, HealthResponse, StatsResponse};
pub use search::{proxied_image_url, SearchHit, SearchResult, IMAGE_PROXY_PATH};
