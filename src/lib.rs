//! SWAPI Cache - A read-through cache in front of the Star Wars API
//!
//! Serves filtered, paginated resource collections and opening-crawl text
//! analytics, memoized in a durable cache with time-based expiry.

pub mod analytics;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
