//! API Module
//!
//! HTTP handlers and routing for the storefront REST API.
//!
//! # Endpoints
//! - `GET /api/image-proxy?url=` - Proxy and cache an allow-listed image
//! - `GET /api/search?term=` - Search albums upstream, cached per term
//! - `/api/albums`, `/api/albums/:id` - Album CRUD pass-through
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
