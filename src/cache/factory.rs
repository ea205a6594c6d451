// ABOUTME: Cache factory for configuration-based backend selection
// ABOUTME: Redis when a URL is configured, bounded in-memory LRU otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::memory::InMemoryCache;
use super::redis::RedisCache;
use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Unified cache backend chosen at startup
#[derive(Clone)]
pub enum Cache {
    /// Process-local LRU store
    Memory(InMemoryCache),
    /// Shared Redis store
    Redis(RedisCache),
}

impl Cache {
    /// Create cache from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    pub async fn from_env() -> AppResult<Self> {
        <Self as CacheProvider>::new(CacheConfig::from_env()).await
    }

    /// Backend name for logs and health output
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for Cache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        if config.redis_url.is_some() {
            info!("Initializing Redis cache backend");
            return Ok(Self::Redis(RedisCache::new(config).await?));
        }

        info!(
            max_entries = config.max_entries,
            "Initializing in-memory cache backend"
        );
        Ok(Self::Memory(InMemoryCache::new(config).await?))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl).await,
            Self::Redis(cache) => cache.set(key, value, ttl).await,
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Redis(cache) => cache.get(key).await,
        }
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.invalidate(key).await,
            Self::Redis(cache) => cache.invalidate(key).await,
        }
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        match self {
            Self::Memory(cache) => cache.invalidate_pattern(pattern).await,
            Self::Redis(cache) => cache.invalidate_pattern(pattern).await,
        }
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        match self {
            Self::Memory(cache) => cache.exists(key).await,
            Self::Redis(cache) => cache.exists(key).await,
        }
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        match self {
            Self::Memory(cache) => cache.ttl(key).await,
            Self::Redis(cache) => cache.ttl(key).await,
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.health_check().await,
            Self::Redis(cache) => cache.health_check().await,
        }
    }

    async fn clear_all(&self) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.clear_all().await,
            Self::Redis(cache) => cache.clear_all().await,
        }
    }
}
