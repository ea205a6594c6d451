// ABOUTME: Redis cache implementation with connection management and TTL support
// ABOUTME: Shares recognition results across instances through SETEX/GET/DEL and SCAN
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::config::RedisConnectionConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, RedisError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};

/// Keys scanned per `SCAN` round trip
const SCAN_BATCH_SIZE: usize = 100;

/// Redis cache implementation
///
/// Uses a `ConnectionManager` for automatic reconnection. Keys are the full
/// rendered [`CacheKey`], so every entry carries the `hawkerlens:` prefix and
/// pattern invalidation never touches keys owned by other services.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    async fn new_with_config(config: &CacheConfig) -> AppResult<Self> {
        let redis_url = config
            .redis_url
            .as_ref()
            .ok_or_else(|| AppError::config("Redis URL is required for Redis cache backend"))?;

        let conn_config = &config.redis_connection;
        info!(
            timeout_secs = conn_config.connection_timeout_secs,
            response_timeout_secs = conn_config.response_timeout_secs,
            retries = conn_config.initial_connection_retries,
            "Connecting to Redis cache"
        );

        let client = Client::open(redis_url.as_str()).map_err(|e| {
            AppError::config_invalid(format!("Invalid Redis URL: {e}")).with_source(e)
        })?;
        let manager = Self::connect_with_retry(&client, conn_config).await?;

        info!("Successfully connected to Redis");
        Ok(Self { manager })
    }

    /// Connect with exponential backoff, doubling the delay up to the configured cap
    async fn connect_with_retry(
        client: &Client,
        conn_config: &RedisConnectionConfig,
    ) -> AppResult<ConnectionManager> {
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_secs(conn_config.connection_timeout_secs))
            .set_response_timeout(Duration::from_secs(conn_config.response_timeout_secs))
            .set_number_of_retries(conn_config.reconnection_retries)
            .set_exponent_base(conn_config.retry_exponent_base)
            .set_max_delay(conn_config.max_retry_delay_ms);

        let max_retries = conn_config.initial_connection_retries;
        let mut delay_ms = conn_config.initial_retry_delay_ms;
        let mut last_error: Option<RedisError> = None;

        for attempt in 0..=max_retries {
            match ConnectionManager::new_with_config(client.clone(), manager_config.clone()).await {
                Ok(manager) => {
                    if attempt > 0 {
                        info!(attempt, "Redis connection established after retries");
                    }
                    return Ok(manager);
                }
                Err(e) => {
                    if attempt < max_retries {
                        warn!(
                            attempt = attempt + 1,
                            total = max_retries + 1,
                            delay_ms,
                            error = %e,
                            "Redis connection attempt failed, retrying"
                        );
                        time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = delay_ms.saturating_mul(2).min(conn_config.max_retry_delay_ms);
                    }
                    last_error = Some(e);
                }
            }
        }

        let detail = last_error.map_or_else(|| "unknown error".to_owned(), |e| e.to_string());
        Err(AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            format!(
                "Failed to connect to Redis after {} attempts: {detail}",
                max_retries + 1
            ),
        ))
    }

    /// Delete every key matching `pattern`, one `SCAN` batch at a time
    async fn delete_matching(&self, pattern: &str) -> AppResult<u64> {
        let mut conn = self.manager.clone();
        let mut deleted_total = 0_u64;
        let mut cursor = 0_u64;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await
                .map_err(|e| command_error("SCAN", e))?;

            if !keys.is_empty() {
                let deleted: u64 = conn
                    .del(&keys)
                    .await
                    .map_err(|e| command_error("DEL", e))?;
                deleted_total += deleted;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(deleted_total)
    }
}

fn command_error(command: &str, e: RedisError) -> AppError {
    error!(command, error = %e, "Redis command failed");
    AppError::storage(format!("Redis {command} failed: {e}")).with_source(e)
}

#[async_trait::async_trait]
impl CacheProvider for RedisCache {
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized,
    {
        Self::new_with_config(&config).await
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        // SETEX rejects a zero expiry
        let ttl_secs = ttl.as_secs().max(1);

        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(key.to_string(), serialized, ttl_secs)
            .await
            .map_err(|e| command_error("SETEX", e))
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let mut conn = self.manager.clone();
        let data: Option<Vec<u8>> = conn
            .get(key.to_string())
            .await
            .map_err(|e| command_error("GET", e))?;

        data.map(|bytes| serde_json::from_slice(&bytes).map_err(AppError::from))
            .transpose()
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key.to_string())
            .await
            .map_err(|e| command_error("DEL", e))
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        // Redis MATCH and glob share wildcard syntax
        self.delete_matching(pattern).await
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        conn.exists(key.to_string())
            .await
            .map_err(|e| command_error("EXISTS", e))
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        let mut conn = self.manager.clone();
        let ttl_secs: i64 = conn
            .ttl(key.to_string())
            .await
            .map_err(|e| command_error("TTL", e))?;

        // -2: missing key, -1: no expiry
        Ok(u64::try_from(ttl_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs))
    }

    async fn health_check(&self) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("PING", e))?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(AppError::storage(format!(
                "Unexpected PING response '{response}'"
            )))
        }
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.delete_matching(&CacheKey::global_pattern())
            .await
            .map(|_| ())
    }
}
