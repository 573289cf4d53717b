//! Retention Sweep Task
//!
//! Background task that periodically deletes cache rows older than the
//! cache TTL. Such rows can never be served again, so removing them only
//! bounds storage growth.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheBackend;

/// Runs a single sweep, deleting entries created more than `retention` ago.
///
/// Returns the number of entries removed.
pub async fn sweep_stale_entries(backend: &dyn CacheBackend, retention: Duration) -> usize {
    let cutoff = chrono::Duration::from_std(retention)
        .ok()
        .and_then(|retention| Utc::now().checked_sub_signed(retention));
    let Some(cutoff) = cutoff else {
        return 0;
    };

    match backend.purge_created_before(cutoff).await {
        Ok(removed) => removed,
        Err(err) => {
            warn!("Retention sweep failed: {}", err);
            0
        }
    }
}

/// Spawns a background task that periodically removes stale cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval_secs` between
/// sweeps.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let backend: Arc<dyn CacheBackend> = Arc::new(MemoryStore::new());
/// let handle = spawn_cleanup_task(backend, Duration::from_secs(86_400), 3600);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task(
    backend: Arc<dyn CacheBackend>,
    retention: Duration,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting retention sweep with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = sweep_stale_entries(backend.as_ref(), retention).await;
            if removed > 0 {
                info!("Retention sweep: removed {} stale entries", removed);
            } else {
                debug!("Retention sweep: no stale entries found");
            }
        }
    })
}
