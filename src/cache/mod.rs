// ABOUTME: Cache abstraction layer for recognition results, profiles, and common food lookups
// ABOUTME: Pluggable backend support (in-memory, Redis) behind a namespaced key scheme
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache factory selecting a backend from configuration
pub mod factory;
/// In-memory cache implementation
pub mod memory;
/// Fail-open typed cache used by the meal analysis pipeline
pub mod recognition;
/// Redis cache implementation
pub mod redis;

pub use crate::config::cache::{CacheConfig, CacheTtlConfig};
pub use factory::Cache;
pub use recognition::{CacheMetrics, RecognitionCache};

use crate::errors::AppResult;
use hawkerlens_core::constants::cache::{
    CACHE_KEY_PREFIX, COMMON_FOOD_PREFIX, METRICS_COUNTER_ID, METRICS_PREFIX, PROFILE_PREFIX,
    RECOGNITION_PREFIX, TTL_COMMON_FOOD_SECS, TTL_METRICS_SECS, TTL_PROFILE_SECS,
    TTL_RECOGNITION_SECS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// Backends store serialized JSON under the full rendered [`CacheKey`] and
/// need only support `GET`, `SETEX` and `DEL` semantics plus pattern scans.
///
/// # Examples
///
/// ```rust,no_run
/// use hawkerlens::cache::{CacheConfig, CacheKey, CacheProvider};
/// use hawkerlens::cache::memory::InMemoryCache;
/// use std::time::Duration;
/// # async fn example() -> Result<(), hawkerlens::errors::AppError> {
///
/// let config = CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// };
/// let cache = InMemoryCache::new(config).await?;
///
/// let key = CacheKey::common_food("Chicken Rice");
/// cache.set(&key, &"cached_value", Duration::from_secs(3600)).await?;
///
/// let cached: Option<String> = cache.get(&key).await?;
/// assert_eq!(cached.as_deref(), Some("cached_value"));
///
/// cache.invalidate(&key).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored bytes do not deserialize
    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Remove all cache entries matching a glob over full keys (e.g. `hawkerlens:food_recognition:*`)
    ///
    /// # Errors
    ///
    /// Returns an error if pattern invalidation fails
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Check if key exists in cache
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &CacheKey) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>>;

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Clear all cache entries owned by this service
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Data class of a cached value; each has its own key prefix and TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheNamespace {
    /// Validated recognition results keyed by content hash
    Recognition,
    /// Health profile snapshots keyed by user id
    Profile,
    /// Canonical nutrition for common dishes keyed by normalized name
    CommonFood,
    /// Shared hit/miss/error counter
    Metrics,
}

impl CacheNamespace {
    /// All namespaces
    pub const ALL: [Self; 4] = [
        Self::Recognition,
        Self::Profile,
        Self::CommonFood,
        Self::Metrics,
    ];

    /// Key prefix for this namespace
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Recognition => RECOGNITION_PREFIX,
            Self::Profile => PROFILE_PREFIX,
            Self::CommonFood => COMMON_FOOD_PREFIX,
            Self::Metrics => METRICS_PREFIX,
        }
    }

    /// Built-in TTL when no configuration overrides it
    #[must_use]
    pub const fn default_ttl(self) -> Duration {
        match self {
            Self::Recognition => Duration::from_secs(TTL_RECOGNITION_SECS),
            Self::Profile => Duration::from_secs(TTL_PROFILE_SECS),
            Self::CommonFood => Duration::from_secs(TTL_COMMON_FOOD_SECS),
            Self::Metrics => Duration::from_secs(TTL_METRICS_SECS),
        }
    }
}

impl CacheTtlConfig {
    /// Configured TTL for a namespace
    #[must_use]
    pub const fn ttl_for(&self, namespace: CacheNamespace) -> Duration {
        match namespace {
            CacheNamespace::Recognition => Duration::from_secs(self.recognition_secs),
            CacheNamespace::Profile => Duration::from_secs(self.profile_secs),
            CacheNamespace::CommonFood => Duration::from_secs(self.common_food_secs),
            CacheNamespace::Metrics => Duration::from_secs(self.metrics_secs),
        }
    }
}

/// Structured cache key; renders as `hawkerlens:<namespace prefix>:<id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Data class
    pub namespace: CacheNamespace,
    /// Identifier within the namespace
    pub id: String,
}

impl CacheKey {
    /// Create new cache key
    #[must_use]
    pub fn new(namespace: CacheNamespace, id: impl Into<String>) -> Self {
        Self {
            namespace,
            id: id.into(),
        }
    }

    /// Recognition key: `hash`, or `hash:userId` for a personalized variant
    #[must_use]
    pub fn recognition(content_hash: &str, user_id: Option<&str>) -> Self {
        let id = match user_id {
            Some(user) => format!("{content_hash}:{user}"),
            None => content_hash.to_owned(),
        };
        Self::new(CacheNamespace::Recognition, id)
    }

    /// Profile snapshot key
    #[must_use]
    pub fn profile(user_id: &str) -> Self {
        Self::new(CacheNamespace::Profile, user_id)
    }

    /// Common food key; the name is trimmed, lower-cased, and whitespace-collapsed
    #[must_use]
    pub fn common_food(name: &str) -> Self {
        Self::new(CacheNamespace::CommonFood, normalize_food_name(name))
    }

    /// The single metrics counter key
    #[must_use]
    pub fn metrics() -> Self {
        Self::new(CacheNamespace::Metrics, METRICS_COUNTER_ID)
    }

    /// Glob matching every key in a namespace
    #[must_use]
    pub fn namespace_pattern(namespace: CacheNamespace) -> String {
        format!("{CACHE_KEY_PREFIX}{}:*", namespace.prefix())
    }

    /// Glob matching every key owned by this service
    #[must_use]
    pub fn global_pattern() -> String {
        format!("{CACHE_KEY_PREFIX}*")
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CACHE_KEY_PREFIX}{}:{}", self.namespace.prefix(), self.id)
    }
}

fn normalize_food_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
