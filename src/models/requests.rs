//! Request DTOs for the storefront API
//!
//! Query strings accepted by the HTTP endpoints. Album bodies live in
//! [`super::album`].

use serde::Deserialize;

/// Query for `GET /api/image-proxy`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageProxyQuery {
    /// Percent-encoded upstream image URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Query for `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: Option<String>,
}

/// Query for `GET /api/albums`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAlbumsQuery {
    /// Optional title/artist filter passed through to the album API
    #[serde(default)]
    pub query: Option<String>,
}
