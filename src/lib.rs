//! Album Proxy - backend for a music album storefront
//!
//! Serves an allow-listed image proxy and an upstream album search, each
//! behind its own bounded, expiring in-memory cache, plus a pass-through
//! client for the remote album API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
