// ABOUTME: Cache-related constants for TTL, capacity, and cleanup intervals
// ABOUTME: Supports both in-memory and Redis cache backends with optimal defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum cache entries for in-memory cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Recognition result cache TTL (7 days) - same photo yields the same estimate
pub const TTL_RECOGNITION_SECS: u64 = 604_800;

/// User profile snapshot cache TTL (1 hour) - profiles are edited in chat
pub const TTL_PROFILE_SECS: u64 = 3_600;

/// Common food nutrition lookup TTL (30 days) - canonical values rarely change
pub const TTL_COMMON_FOOD_SECS: u64 = 2_592_000;

/// Metrics counter TTL (24 hours)
pub const TTL_METRICS_SECS: u64 = 86_400;

/// Redis connection timeout in seconds
pub const REDIS_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Redis operation timeout in seconds
pub const REDIS_RESPONSE_TIMEOUT_SECS: u64 = 3;

/// Redis reconnection retries after a dropped connection
pub const REDIS_RECONNECTION_RETRIES: usize = 3;

/// Redis exponential backoff base
pub const REDIS_RETRY_EXPONENT_BASE: u64 = 2;

/// Redis maximum retry delay in milliseconds
pub const REDIS_MAX_RETRY_DELAY_MS: u64 = 5_000;

/// Redis retries for the initial connection at startup
pub const REDIS_INITIAL_CONNECTION_RETRIES: u32 = 3;

/// Redis initial retry delay in milliseconds
pub const REDIS_INITIAL_RETRY_DELAY_MS: u64 = 500;

/// Cache key prefix for namespacing
pub const CACHE_KEY_PREFIX: &str = "hawkerlens:";

/// Namespace prefix for recognition results
pub const RECOGNITION_PREFIX: &str = "food_recognition";

/// Namespace prefix for profile snapshots
pub const PROFILE_PREFIX: &str = "user_profile";

/// Namespace prefix for common food lookups
pub const COMMON_FOOD_PREFIX: &str = "common_food";

/// Namespace prefix for the metrics counter
pub const METRICS_PREFIX: &str = "cache_metrics";

/// Single key holding the hit/miss/error counters
pub const METRICS_COUNTER_ID: &str = "counters";
