//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Retention sweep: deletes cache rows older than the cache TTL

mod cleanup;

pub use cleanup::{spawn_cleanup_task, sweep_stale_entries};
