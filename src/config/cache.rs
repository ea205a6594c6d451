// ABOUTME: Cache configuration types for the recognition cache layer
// ABOUTME: Handles backend selection, Redis connections, capacity, and per-namespace TTLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hawkerlens_core::constants::cache;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Cache configuration for Redis and in-memory caching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Process-wide switch; when false no backend is ever touched
    pub enabled: bool,
    /// Redis URL for distributed caching; selects the Redis backend when set
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Maximum number of entries in local cache
    pub max_entries: usize,
    /// Cache cleanup interval in seconds
    pub cleanup_interval_secs: u64,
    /// Enable background cleanup task (tests usually turn this off)
    pub enable_background_cleanup: bool,
    /// Redis connection configuration
    #[serde(default)]
    pub redis_connection: RedisConnectionConfig,
    /// Cache TTL configuration
    #[serde(default)]
    pub ttl: CacheTtlConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            redis_url: None,
            max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval_secs: cache::DEFAULT_CLEANUP_INTERVAL_SECS,
            enable_background_cleanup: true,
            redis_connection: RedisConnectionConfig::default(),
            ttl: CacheTtlConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            enabled: !env::var("CACHE_ENABLED").is_ok_and(|value| is_disabled_flag(&value)),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::DEFAULT_CACHE_MAX_ENTRIES),
            cleanup_interval_secs: env::var("CACHE_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
            redis_connection: RedisConnectionConfig::from_env(),
            ttl: CacheTtlConfig::from_env(),
        }
    }

    /// Cleanup interval as a `Duration`, never shorter than one second
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

fn is_disabled_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

/// Cache TTL configuration for each key namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheTtlConfig {
    /// Recognition result TTL in seconds (default: 7 days)
    pub recognition_secs: u64,
    /// Profile snapshot TTL in seconds (default: 1 hour)
    pub profile_secs: u64,
    /// Common food lookup TTL in seconds (default: 30 days)
    pub common_food_secs: u64,
    /// Metrics counter TTL in seconds (default: 24 hours)
    pub metrics_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            recognition_secs: cache::TTL_RECOGNITION_SECS,
            profile_secs: cache::TTL_PROFILE_SECS,
            common_food_secs: cache::TTL_COMMON_FOOD_SECS,
            metrics_secs: cache::TTL_METRICS_SECS,
        }
    }
}

impl CacheTtlConfig {
    /// Load cache TTL configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            recognition_secs: env::var("CACHE_TTL_RECOGNITION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::TTL_RECOGNITION_SECS),
            profile_secs: env::var("CACHE_TTL_PROFILE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::TTL_PROFILE_SECS),
            common_food_secs: env::var("CACHE_TTL_COMMON_FOOD_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::TTL_COMMON_FOOD_SECS),
            metrics_secs: env::var("CACHE_TTL_METRICS_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::TTL_METRICS_SECS),
        }
    }
}

/// Redis connection and retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConnectionConfig {
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// Response/command timeout in seconds
    pub response_timeout_secs: u64,
    /// Number of reconnection retries after connection drop
    pub reconnection_retries: usize,
    /// Exponential backoff base for retry delays
    pub retry_exponent_base: u64,
    /// Maximum retry delay in milliseconds
    pub max_retry_delay_ms: u64,
    /// Number of retries for initial connection at startup
    pub initial_connection_retries: u32,
    /// Initial retry delay in milliseconds (doubles with exponential backoff)
    pub initial_retry_delay_ms: u64,
}

impl Default for RedisConnectionConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: cache::REDIS_CONNECT_TIMEOUT_SECS,
            response_timeout_secs: cache::REDIS_RESPONSE_TIMEOUT_SECS,
            reconnection_retries: cache::REDIS_RECONNECTION_RETRIES,
            retry_exponent_base: cache::REDIS_RETRY_EXPONENT_BASE,
            max_retry_delay_ms: cache::REDIS_MAX_RETRY_DELAY_MS,
            initial_connection_retries: cache::REDIS_INITIAL_CONNECTION_RETRIES,
            initial_retry_delay_ms: cache::REDIS_INITIAL_RETRY_DELAY_MS,
        }
    }
}

impl RedisConnectionConfig {
    /// Load Redis connection configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            connection_timeout_secs: env::var("REDIS_CONNECTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_CONNECT_TIMEOUT_SECS),
            response_timeout_secs: env::var("REDIS_RESPONSE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_RESPONSE_TIMEOUT_SECS),
            reconnection_retries: env::var("REDIS_RECONNECTION_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_RECONNECTION_RETRIES),
            retry_exponent_base: env::var("REDIS_RETRY_EXPONENT_BASE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_RETRY_EXPONENT_BASE),
            max_retry_delay_ms: env::var("REDIS_MAX_RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_MAX_RETRY_DELAY_MS),
            initial_connection_retries: env::var("REDIS_INITIAL_CONNECTION_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_INITIAL_CONNECTION_RETRIES),
            initial_retry_delay_ms: env::var("REDIS_INITIAL_RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::REDIS_INITIAL_RETRY_DELAY_MS),
        }
    }
}
