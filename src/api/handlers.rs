//! API Handlers
//!
//! HTTP request handlers for each storefront endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Album, AlbumDraft, AlbumInput, CacheStatsResponse, DeleteResponse, HealthResponse, ImageProxyQuery,
    ListAlbumsQuery, SearchHit, SearchQuery, StatsResponse,
};
use crate::services::{build_http_client, AlbumClient, ImageFetcher, SearchFetcher};

/// `Cache-Control` sent with proxied images: one day, shared caches allowed.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Application state shared across all handlers.
///
/// Each fetcher owns its own cache instance; clones share them.
#[derive(Debug, Clone)]
pub struct AppState {
    pub images: ImageFetcher,
    pub search: SearchFetcher,
    pub albums: AlbumClient,
}

impl AppState {
    pub fn new(images: ImageFetcher, search: SearchFetcher, albums: AlbumClient) -> Self {
        Self {
            images,
            search,
            albums,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the shared HTTP client and one cache per logical use with the
    /// configured TTL and capacity.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = build_http_client(config.api_timeout())?;
        Ok(Self::with_client(config, http))
    }

    /// Same as [`AppState::from_config`] with a caller-supplied HTTP client.
    pub fn with_client(config: &Config, http: Client) -> Self {
        let image_cache =
            SharedCache::new(config.image_cache_capacity, config.image_cache_ttl());
        let search_cache =
            SharedCache::new(config.search_cache_capacity, config.search_cache_ttl());

        Self::new(
            ImageFetcher::new(
                http.clone(),
                image_cache,
                config.image_allowed_hosts.clone(),
            ),
            SearchFetcher::new(http.clone(), search_cache, config.search_api_url.clone()),
            AlbumClient::new(http, config.album_api_url.clone()),
        )
    }
}

/// Handler for GET /api/image-proxy?url=
///
/// Returns image bytes with the upstream content type.
pub async fn image_proxy_handler(
    State(state): State<AppState>,
    Query(query): Query<ImageProxyQuery>,
) -> Result<Response> {
    let image = state.images.fetch(query.url.as_deref()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        image.bytes,
    )
        .into_response())
}

/// Handler for GET /api/search?term=
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>> {
    let term = query.term.unwrap_or_default();
    let results = state.search.search(&term).await?;

    Ok(Json(results.into_iter().map(SearchHit::from).collect()))
}

/// Handler for GET /api/albums
pub async fn list_albums_handler(
    State(state): State<AppState>,
    Query(query): Query<ListAlbumsQuery>,
) -> Result<Json<Vec<Album>>> {
    let albums = state.albums.list(query.query.as_deref()).await?;
    Ok(Json(albums))
}

/// Handler for GET /api/albums/:id
pub async fn get_album_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Album>> {
    state
        .albums
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| album_not_found(id))
}

/// Validates an album body into an [`AlbumInput`].
///
/// Unreadable JSON is a plain validation error; bad or missing fields are
/// reported per field.
fn album_input(
    payload: std::result::Result<Json<AlbumDraft>, JsonRejection>,
) -> Result<AlbumInput> {
    let Json(draft) =
        payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    draft.into_input().map_err(AppError::InvalidFields)
}

/// Handler for POST /api/albums
pub async fn create_album_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AlbumDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Album>)> {
    let input = album_input(payload)?;
    let album = state.albums.create(&input).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// Handler for PUT /api/albums/:id
pub async fn update_album_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<AlbumDraft>, JsonRejection>,
) -> Result<Json<Album>> {
    let input = album_input(payload)?;
    state
        .albums
        .update(id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| album_not_found(id))
}

/// Handler for DELETE /api/albums/:id
pub async fn delete_album_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    if state.albums.delete(id).await? {
        Ok(Json(DeleteResponse::new(id)))
    } else {
        Err(album_not_found(id))
    }
}

fn album_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Album {} not found", id))
}

/// Handler for GET /stats
///
/// Returns statistics for both caches.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let images = state.images.cache();
    let search = state.search.cache();

    Json(StatsResponse {
        images: CacheStatsResponse::new(
            &images.stats().await,
            images.capacity(),
            images.ttl().as_millis() as u64,
        ),
        search: CacheStatsResponse::new(
            &search.stats().await,
            search.capacity(),
            search.ttl().as_millis() as u64,
        ),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
