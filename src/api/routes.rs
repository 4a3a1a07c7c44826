//! API Routes
//!
//! Configures the Axum router with all storefront endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_album_handler, delete_album_handler, get_album_handler, health_handler,
    image_proxy_handler, list_albums_handler, search_handler, stats_handler,
    update_album_handler, AppState,
};
use crate::models::IMAGE_PROXY_PATH;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/image-proxy?url=` - Cached image proxy
/// - `GET /api/search?term=` - Cached upstream album search
/// - `GET|POST /api/albums` - List / create albums
/// - `GET|PUT|DELETE /api/albums/:id` - Read / update / delete one album
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(IMAGE_PROXY_PATH, get(image_proxy_handler))
        .route("/api/search", get(search_handler))
        .route(
            "/api/albums",
            get(list_albums_handler).post(create_album_handler),
        )
        .route(
            "/api/albums/:id",
            get(get_album_handler)
                .put(update_album_handler)
                .delete(delete_album_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
