// ABOUTME: In-memory cache implementation with LRU eviction and TTL support
// ABOUTME: Includes background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::{AppError, AppResult};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::time::{self, Instant};
use tracing::debug;

type Store = Arc<RwLock<LruCache<String, CacheEntry>>>;

/// In-memory cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at.checked_duration_since(Instant::now())
    }
}

/// In-memory cache with LRU eviction and background cleanup
///
/// The store is shared with the optional cleanup task, which exits when the
/// last clone of the cache is dropped.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Store,
    shutdown_tx: Option<Arc<mpsc::Sender<()>>>,
}

impl InMemoryCache {
    /// Capacity used when the configuration specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    fn new_with_config(config: &CacheConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        let store: Store = Arc::new(RwLock::new(LruCache::new(capacity)));

        let shutdown_tx = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
            let store_clone = store.clone();
            let cleanup_interval = config.cleanup_interval();

            tokio::spawn(async move {
                let mut interval = time::interval(cleanup_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::cleanup_expired(&store_clone).await;
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("Cache cleanup task received shutdown signal");
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(shutdown_tx))
        } else {
            None
        };

        Self { store, shutdown_tx }
    }

    /// Remove all expired entries, returning how many were dropped
    async fn cleanup_expired(store: &Store) -> usize {
        let mut guard = store.write().await;
        let expired_keys: Vec<String> = guard
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired_keys {
            guard.pop(key);
        }
        drop(guard);

        let removed = expired_keys.len();
        if removed > 0 {
            debug!(removed, "Cleaned up expired cache entries");
        }
        removed
    }

    /// Number of live and not-yet-collected entries
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Run one cleanup pass immediately
    pub async fn purge_expired(&self) -> usize {
        Self::cleanup_expired(&self.store).await
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self::new_with_config(&config))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let entry = CacheEntry::new(serialized, ttl);

        // LruCache evicts the least recently used entry on push
        self.store.write().await.push(key.to_string(), entry);
        Ok(())
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let rendered = key.to_string();
        let mut store = self.store.write().await;

        // LruCache::get updates access order, so it needs the write lock
        let data = match store.get(&rendered) {
            Some(entry) if entry.is_expired() => {
                store.pop(&rendered);
                None
            }
            Some(entry) => Some(entry.data.clone()),
            None => None,
        };
        drop(store);

        data.map(|bytes| serde_json::from_slice(&bytes).map_err(AppError::from))
            .transpose()
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.store.write().await.pop(&key.to_string());
        Ok(())
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
            AppError::invalid_input(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        let mut store = self.store.write().await;
        let keys_to_remove: Vec<String> = store
            .iter()
            .filter(|(key, _)| glob_pattern.matches(key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys_to_remove {
            store.pop(key);
        }
        drop(store);

        Ok(keys_to_remove.len() as u64)
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        let rendered = key.to_string();
        let mut store = self.store.write().await;
        let live = match store.peek(&rendered) {
            Some(entry) if entry.is_expired() => {
                store.pop(&rendered);
                false
            }
            Some(_) => true,
            None => false,
        };
        drop(store);
        Ok(live)
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        let store = self.store.read().await;
        // peek leaves LRU order untouched
        let remaining = store
            .peek(&key.to_string())
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::remaining_ttl);
        drop(store);
        Ok(remaining)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.store.write().await.clear();
        Ok(())
    }
}

impl Drop for InMemoryCache {
    fn drop(&mut self) {
        // Only the last clone signals; earlier drops leave the task running
        if let Some(tx) = &self.shutdown_tx {
            if Arc::strong_count(tx) == 1 {
                if let Err(e) = tx.try_send(()) {
                    debug!(error = ?e, "Cache shutdown signal send failed (channel likely closed)");
                }
            }
        }
    }
}
