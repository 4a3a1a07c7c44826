//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry purge: removes expired image and search cache entries

mod cleanup;

pub use cleanup::spawn_cleanup_task;
