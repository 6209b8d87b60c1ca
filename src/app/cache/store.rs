//! In-memory memoization store with per-entry expiry
//!
//! [`MemoCache`] is a cheap-to-clone handle; every clone shares the same
//! entries. Values are stored behind `Arc` and handed out by reference, so a
//! cached value is never copied and never mutated after insertion.
//!
//! Concurrent misses on the same cold key are not coalesced: each caller runs
//! its own producer and the last writer wins. Distinct keys never interfere.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::stats::{CacheCounters, CacheStats};
use crate::constants::cache::MIN_SWEEP_INTERVAL;

/// A cached value with its absolute expiry
#[derive(Debug)]
pub struct CacheEntry<V> {
    value: Arc<V>,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: Arc<V>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Whether readers may still see this entry
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Shared key/value cache with expiry
pub struct MemoCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    counters: Arc<CacheCounters>,
}

impl<K, V> Clone for MemoCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            counters: Arc::clone(&self.counters),
        }
    }
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            counters: Arc::new(CacheCounters::default()),
        }
    }
}

impl<K, V> fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache").finish_non_exhaustive()
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live value for `key`, if any
    pub async fn get(&self, key: &K) -> Option<Arc<V>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => {
                self.counters.record_hit();
                debug!("Cache HIT: {:?}", key);
                Some(Arc::clone(&entry.value))
            }
            _ => {
                self.counters.record_miss();
                debug!("Cache MISS: {:?}", key);
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry wholesale
    pub async fn insert(&self, key: K, value: V, ttl: Duration) -> Arc<V> {
        let value = Arc::new(value);
        self.insert_shared(key, Arc::clone(&value), ttl).await;
        value
    }

    async fn insert_shared(&self, key: K, value: Arc<V>, ttl: Duration) {
        debug!("Cache SET: {:?} (TTL: {}s)", key, ttl.as_secs());
        let mut entries = self.entries.write().await;
        if let Some(previous) = entries.insert(key, CacheEntry::new(value, ttl)) {
            if !previous.is_live(Instant::now()) {
                self.counters.record_evictions(1);
            }
        }
        self.counters.record_insert();
    }

    /// Return the live value for `key`, or run `producer` and cache its result
    ///
    /// A producer error is returned to the caller and nothing is stored.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: K,
        producer: F,
        ttl: Duration,
    ) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }

        let value = Arc::new(producer().await?);
        self.insert_shared(key, Arc::clone(&value), ttl).await;
        Ok(value)
    }

    /// Drop one entry; returns whether it was present
    pub async fn remove(&self, key: &K) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drop every entry and reset counters
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        self.counters.reset();
        debug!("Cache cleared all entries");
    }

    /// Physically remove expired entries; returns how many were removed
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let removed = before - entries.len();
        if removed > 0 {
            self.counters.record_evictions(removed);
        }
        removed
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let live = entries.values().filter(|entry| entry.is_live(now)).count();
        self.counters.snapshot(entries.len(), live)
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Start a background task that sweeps expired entries every `interval`
    /// until `shutdown_rx` fires
    ///
    /// Intervals below 100ms (zero included) are raised to 100ms.
    pub fn spawn_sweeper(
        &self,
        interval: Duration,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let cache = self.clone();
        tokio::spawn(async move {
            let mut sweep_interval = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = sweep_interval.tick() => {
                        let removed = cache.sweep_expired().await;
                        if removed > 0 {
                            debug!("Swept {} expired cache entries", removed);
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Cache sweeper received shutdown signal");
                        break;
                    }
                }
            }
        })
    }
}
