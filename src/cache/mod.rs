//! Cache Module
//!
//! Durable key/value storage for serialized results and the cache-aside
//! engine that sits in front of the upstream API.

mod aside;
mod entry;
mod sqlite;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use aside::CacheAside;
pub use entry::CacheEntry;
pub use sqlite::SqliteStore;
pub use stats::{CacheStats, LookupOutcome};
pub use store::{CacheBackend, MemoryStore};
