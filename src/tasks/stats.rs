//! Stats Reporter Task
//!
//! Background task that periodically logs sample cache statistics.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::speech::SharedCache;

/// Spawns a background task that logs cache statistics every
/// `interval_secs` seconds.
///
/// Only takes a read lock, so it never changes recency order. Quiet
/// periods (no lookups since the previous report) log at debug level.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_stats_task(service.cache(), 60);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_stats_task(cache: SharedCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache stats task with interval of {} seconds",
            interval.as_secs()
        );

        let mut last_lookups = 0;
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.read().await.stats();
            let lookups = stats.hits + stats.misses;

            if lookups != last_lookups {
                info!(
                    items = stats.items,
                    max_items = stats.max_items,
                    memory_mb = stats.memory_mb(),
                    max_memory_mb = stats.max_memory_mb(),
                    hit_rate = stats.hit_rate(),
                    evictions = stats.evictions,
                    "Samples cache stats"
                );
            } else {
                debug!(items = stats.items, "Samples cache idle");
            }
            last_lookups = lookups;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{derive_key, AudioSamples};
    use crate::speech::SampleCache;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[tokio::test]
    async fn test_stats_task_does_not_touch_entries() {
        let cache = Arc::new(RwLock::new(SampleCache::new(2, 1024)));
        {
            let mut guard = cache.write().await;
            guard.put(derive_key("a"), Arc::new(AudioSamples::new(vec![0.0; 4], 8_000)));
            guard.put(derive_key("b"), Arc::new(AudioSamples::new(vec![0.0; 4], 8_000)));
        }

        let handle = spawn_stats_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let guard = cache.read().await;
            assert_eq!(guard.len(), 2);
            assert_eq!(guard.peek_lru(), Some(&derive_key("a")));
            assert_eq!(guard.memory_bytes(), 32);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_stats_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(SampleCache::new(10, 1024)));

        let handle = spawn_stats_task(cache, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
