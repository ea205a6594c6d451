// ABOUTME: Fail-open typed cache for recognition results, profile snapshots, and common foods
// ABOUTME: Absorbs every backend error, tracks hit/miss/error counters, and can be disabled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recognition cache
//!
//! Caching is an optimization, never a correctness dependency:
//!
//! - read errors degrade to a miss, write errors are logged and dropped
//! - when disabled, no backend call of any kind is made
//! - every lookup and store updates a shared counter by read-modify-write;
//!   concurrent updates may lose increments and that is accepted

use super::factory::Cache;
use super::{CacheConfig, CacheKey, CacheNamespace, CacheProvider, CacheTtlConfig};
use crate::errors::AppResult;
use hawkerlens_core::models::{HealthProfile, NutritionProfile, RecognitionResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Snapshot of the shared cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMetrics {
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups that found nothing (including degraded reads)
    pub misses: u64,
    /// Backend or serialization failures
    pub errors: u64,
}

impl CacheMetrics {
    /// Fraction of lookups that hit, `0.0` before any lookup
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CacheEvent {
    Hit,
    Miss,
    Error,
    ErrorMiss,
}

impl CacheEvent {
    fn apply(self, metrics: &mut CacheMetrics) {
        match self {
            Self::Hit => metrics.hits += 1,
            Self::Miss => metrics.misses += 1,
            Self::Error => metrics.errors += 1,
            Self::ErrorMiss => {
                metrics.errors += 1;
                metrics.misses += 1;
            }
        }
    }
}

/// Typed, fail-open facade over a [`CacheProvider`]
#[derive(Clone)]
pub struct RecognitionCache<C: CacheProvider = Cache> {
    backend: Option<C>,
    ttl: CacheTtlConfig,
}

impl RecognitionCache<Cache> {
    /// Build the cache described by `config`
    ///
    /// A disabled configuration never constructs a backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured backend cannot be initialized
    pub async fn from_config(config: CacheConfig) -> AppResult<Self> {
        if !config.enabled {
            info!("Recognition cache disabled by configuration");
            return Ok(Self::disabled());
        }
        let ttl = config.ttl.clone();
        let backend = <Cache as CacheProvider>::new(config).await?;
        info!(backend = backend.backend_name(), "Recognition cache ready");
        Ok(Self::new(backend, ttl))
    }
}

impl<C: CacheProvider> RecognitionCache<C> {
    /// Enabled cache over `backend`
    #[must_use]
    pub const fn new(backend: C, ttl: CacheTtlConfig) -> Self {
        Self {
            backend: Some(backend),
            ttl,
        }
    }

    /// Cache over `backend` honouring the `enabled` switch and TTLs of `config`
    #[must_use]
    pub fn from_backend(backend: C, config: &CacheConfig) -> Self {
        if config.enabled {
            Self::new(backend, config.ttl.clone())
        } else {
            Self::disabled()
        }
    }

    /// Cache that never touches a backend
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            backend: None,
            ttl: CacheTtlConfig::default(),
        }
    }

    /// Whether a backend is attached
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Cached recognition for a content hash, optionally personalized per user
    pub async fn get_food_recognition(
        &self,
        content_hash: &str,
        user_id: Option<&str>,
    ) -> Option<RecognitionResult> {
        self.lookup(&CacheKey::recognition(content_hash, user_id))
            .await
    }

    /// Store a recognition result; the shared and per-user variants are independent entries
    pub async fn set_food_recognition(
        &self,
        content_hash: &str,
        user_id: Option<&str>,
        result: &RecognitionResult,
    ) {
        self.store(&CacheKey::recognition(content_hash, user_id), result)
            .await;
    }

    /// Drop one recognition entry
    pub async fn invalidate_food_recognition(&self, content_hash: &str, user_id: Option<&str>) {
        self.remove(&CacheKey::recognition(content_hash, user_id))
            .await;
    }

    /// Whether a recognition entry exists, without counting a hit or miss
    pub async fn has_food_recognition(&self, content_hash: &str, user_id: Option<&str>) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };
        let key = CacheKey::recognition(content_hash, user_id);
        backend.exists(&key).await.unwrap_or_else(|e| {
            warn!(cache_key = %key, error = %e, "Cache existence check failed");
            false
        })
    }

    /// Remaining lifetime of a recognition entry, `None` if absent or unreadable
    pub async fn food_recognition_ttl(
        &self,
        content_hash: &str,
        user_id: Option<&str>,
    ) -> Option<Duration> {
        let backend = self.backend.as_ref()?;
        let key = CacheKey::recognition(content_hash, user_id);
        backend.ttl(&key).await.unwrap_or_else(|e| {
            warn!(cache_key = %key, error = %e, "Cache TTL check failed");
            None
        })
    }

    /// Cached profile snapshot
    pub async fn get_user_profile(&self, user_id: &str) -> Option<HealthProfile> {
        self.lookup(&CacheKey::profile(user_id)).await
    }

    /// Store a profile snapshot
    pub async fn set_user_profile(&self, user_id: &str, profile: &HealthProfile) {
        self.store(&CacheKey::profile(user_id), profile).await;
    }

    /// Drop a profile snapshot after the user edits their profile
    pub async fn invalidate_user_profile(&self, user_id: &str) {
        self.remove(&CacheKey::profile(user_id)).await;
    }

    /// Canonical nutrition for a dish, looked up by normalized name
    pub async fn get_common_food(&self, name: &str) -> Option<NutritionProfile> {
        self.lookup(&CacheKey::common_food(name)).await
    }

    /// Store canonical nutrition for a dish
    pub async fn set_common_food(&self, name: &str, nutrition: &NutritionProfile) {
        self.store(&CacheKey::common_food(name), nutrition).await;
    }

    /// Drop canonical nutrition for a dish
    pub async fn invalidate_common_food(&self, name: &str) {
        self.remove(&CacheKey::common_food(name)).await;
    }

    /// Drop every entry in a namespace, returning how many were removed (0 on failure)
    pub async fn invalidate_namespace(&self, namespace: CacheNamespace) -> u64 {
        let Some(backend) = &self.backend else {
            return 0;
        };
        match backend
            .invalidate_pattern(&CacheKey::namespace_pattern(namespace))
            .await
        {
            Ok(removed) => {
                debug!(namespace = namespace.prefix(), removed, "Cache namespace invalidated");
                removed
            }
            Err(e) => {
                warn!(namespace = namespace.prefix(), error = %e, "Cache namespace invalidation failed");
                0
            }
        }
    }

    /// Drop every entry this service owns, counters included; `false` on failure
    pub async fn clear(&self) -> bool {
        let Some(backend) = &self.backend else {
            return true;
        };
        match backend.clear_all().await {
            Ok(()) => {
                info!("Recognition cache cleared");
                true
            }
            Err(e) => {
                warn!(error = %e, "Cache clear failed");
                false
            }
        }
    }

    /// Current counters; zeros when disabled or unreadable
    pub async fn metrics(&self) -> CacheMetrics {
        let Some(backend) = &self.backend else {
            return CacheMetrics::default();
        };
        match backend.get::<CacheMetrics>(&CacheKey::metrics()).await {
            Ok(metrics) => metrics.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Cache metrics read failed");
                CacheMetrics::default()
            }
        }
    }

    /// Reset the shared counters
    pub async fn reset_metrics(&self) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend.invalidate(&CacheKey::metrics()).await {
            warn!(error = %e, "Cache metrics reset failed");
        }
    }

    /// Backend health; a disabled cache reports healthy
    pub async fn is_healthy(&self) -> bool {
        match &self.backend {
            Some(backend) => backend.health_check().await.is_ok(),
            None => true,
        }
    }

    async fn lookup<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> Option<T> {
        let backend = self.backend.as_ref()?;
        match backend.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!(cache_key = %key, "Cache hit");
                self.record(backend, CacheEvent::Hit).await;
                Some(value)
            }
            Ok(None) => {
                debug!(cache_key = %key, "Cache miss");
                self.record(backend, CacheEvent::Miss).await;
                None
            }
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache read failed, treating as miss");
                self.record(backend, CacheEvent::ErrorMiss).await;
                None
            }
        }
    }

    async fn store<T: Serialize + Send + Sync>(&self, key: &CacheKey, value: &T) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend
            .set(key, value, self.ttl.ttl_for(key.namespace))
            .await
        {
            warn!(cache_key = %key, error = %e, "Cache write failed, dropping");
            self.record(backend, CacheEvent::Error).await;
        }
    }

    async fn remove(&self, key: &CacheKey) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend.invalidate(key).await {
            warn!(cache_key = %key, error = %e, "Cache invalidation failed");
            self.record(backend, CacheEvent::Error).await;
        }
    }

    async fn record(&self, backend: &C, event: CacheEvent) {
        let key = CacheKey::metrics();
        let mut metrics = match backend.get::<CacheMetrics>(&key).await {
            Ok(current) => current.unwrap_or_default(),
            Err(e) => {
                debug!(error = %e, "Cache metrics read failed, skipping update");
                return;
            }
        };
        event.apply(&mut metrics);
        if let Err(e) = backend
            .set(&key, &metrics, self.ttl.ttl_for(CacheNamespace::Metrics))
            .await
        {
            debug!(error = %e, "Cache metrics write failed");
        }
    }
}
