//! Album API Client
//!
//! Pass-through CRUD calls to the remote album API. Nothing here is cached.

use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Album, AlbumInput};

#[derive(Debug, Clone)]
pub struct AlbumClient {
    http: reqwest::Client,
    base_url: String,
}

impl AlbumClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}/albums", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/albums/{}", self.base_url, id)
    }

    /// Lists albums, optionally filtered by a title/artist query.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Album>> {
        let mut request = self.http.get(self.collection_url());
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.query(&[("search", q)]);
        }

        let albums = request
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Album>>()
            .await?;
        debug!(count = albums.len(), "listed albums");
        Ok(albums)
    }

    /// Fetches one album; `None` when upstream reports 404.
    pub async fn get(&self, id: i64) -> Result<Option<Album>> {
        let response = self.http.get(self.item_url(id)).send().await?;
        optional_json(response).await
    }

    /// Validates and creates an album.
    pub async fn create(&self, input: &AlbumInput) -> Result<Album> {
        ensure_valid(input)?;

        let album = self
            .http
            .post(self.collection_url())
            .json(input)
            .send()
            .await?
            .error_for_status()?
            .json::<Album>()
            .await?;
        debug!(id = album.id, "created album");
        Ok(album)
    }

    /// Validates and replaces an album; `None` when it does not exist.
    pub async fn update(&self, id: i64, input: &AlbumInput) -> Result<Option<Album>> {
        ensure_valid(input)?;

        let response = self.http.put(self.item_url(id)).json(input).send().await?;
        optional_json(response).await
    }

    /// Deletes an album. Returns false when it did not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        response.error_for_status()?;
        debug!(id, "deleted album");
        Ok(true)
    }
}

fn ensure_valid(input: &AlbumInput) -> Result<()> {
    let errors = input.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidFields(errors))
    }
}

async fn optional_json(response: Response) -> Result<Option<Album>> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let album = response.error_for_status()?.json::<Album>().await?;
    Ok(Some(album))
}
