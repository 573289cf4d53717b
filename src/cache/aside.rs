//! Cache-Aside Engine
//!
//! Serves fresh cached values and falls back to a producer on a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheStats, LookupOutcome};
use crate::error::CacheError;

// == Cache Aside ==
/// Read-through cache over a [`CacheBackend`].
///
/// Reads are authoritative: a stored value is only returned while fresh and
/// decodable. Writes are best-effort: any backend failure is logged, counted
/// and otherwise ignored.
#[derive(Clone)]
pub struct CacheAside {
    backend: Arc<dyn CacheBackend>,
    stats: Arc<RwLock<CacheStats>>,
}

impl CacheAside {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        }
    }

    /// Returns the shared backend handle.
    pub fn backend(&self) -> Arc<dyn CacheBackend> {
        self.backend.clone()
    }

    /// Returns a snapshot of the lookup counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    // == Get Or Compute ==
    /// Returns the value cached under `key` if it is younger than `ttl`,
    /// otherwise runs `producer`, stores its output and returns it.
    ///
    /// Producer errors are returned as-is and nothing is cached for them.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.lookup(key, ttl).await {
            return Ok(value);
        }

        let value = producer().await?;
        self.store(key, &value).await;
        Ok(value)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        let (outcome, value) = match self.backend.get(key).await {
            Ok(Some(entry)) if entry.is_fresh(ttl) => match serde_json::from_str::<T>(&entry.value) {
                Ok(value) => {
                    debug!("Cache hit for '{}'", key);
                    (LookupOutcome::Hit, Some(value))
                }
                Err(e) => {
                    warn!("Discarding cached value for '{}': {}", key, CacheError::Decode(e));
                    (LookupOutcome::Invalid, None)
                }
            },
            Ok(Some(_)) => {
                debug!("Cache entry for '{}' is stale", key);
                (LookupOutcome::Miss, None)
            }
            Ok(None) => {
                debug!("Cache miss for '{}'", key);
                (LookupOutcome::Miss, None)
            }
            Err(err) => {
                warn!("Treating '{}' as a miss: {}", key, err);
                (LookupOutcome::ReadFailure, None)
            }
        };

        self.stats.write().await.record(outcome);
        value
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) {
        let result = match serde_json::to_string(value) {
            Ok(encoded) => self.backend.put(key, &encoded, Utc::now()).await,
            Err(e) => Err(CacheError::Encode(e)),
        };

        if let Err(err) = result {
            warn!("Could not cache '{}': {}", key, err);
            self.stats.write().await.record_write_failure();
        }
    }
}
