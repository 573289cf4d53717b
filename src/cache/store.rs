//! Cache Store Module
//!
//! The storage seam behind the cache-aside engine, plus an in-memory backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Cache Backend ==
/// Key/value storage for serialized cache entries.
///
/// Implementations must make `put` an atomic upsert per key: concurrent
/// writers may race, but the stored row is always one writer's complete
/// value and timestamp.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Looks up an entry. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// Inserts or replaces the entry stored under `key`.
    async fn put(
        &self,
        key: &str,
        value: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), CacheError>;

    /// Deletes every entry created strictly before `cutoff`.
    ///
    /// Returns the number of entries removed.
    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, CacheError>;
}

// == Memory Store ==
/// In-process backend. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let entry = CacheEntry::with_created_at(value.to_string(), created_at);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, CacheError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.created_at >= cutoff);
        Ok(before - entries.len())
    }
}
