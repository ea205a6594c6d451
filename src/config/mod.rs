// ABOUTME: Configuration management module for the meal analysis service
// ABOUTME: Aggregates cache, image, recognition, and logging settings loaded from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for `HawkerLens`
//!
//! All settings come from environment variables with named defaults:
//!
//! - **Cache**: backend selection, capacity, namespace TTLs, Redis retries
//! - **Image**: normalization bounding box, JPEG quality, input size limit
//! - **Recognition**: recognizer deadline, low-confidence threshold, language
//! - **Logging**: level, format, and structured fields

/// Cache and Redis configuration
pub mod cache;
/// Image normalizer configuration
pub mod image;
/// Recognition pipeline configuration
pub mod recognition;

pub use cache::{CacheConfig, CacheTtlConfig, RedisConnectionConfig};
pub use image::ImageConfig;
pub use recognition::RecognitionConfig;

use crate::errors::{AppError, AppResult};
use crate::logging::LoggingConfig;
use hawkerlens_core::constants::recognition::MAX_CONFIDENCE;
use tracing::info;

/// Complete service configuration
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Cache layer
    pub cache: CacheConfig,
    /// Image normalizer
    pub image: ImageConfig,
    /// Recognition pipeline
    pub recognition: RecognitionConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load every section from the environment and validate the result
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `ConfigInvalid` if a loaded value is unusable
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            cache: CacheConfig::from_env(),
            image: ImageConfig::from_env(),
            recognition: RecognitionConfig::from_env(),
            logging: LoggingConfig::from_env(),
        };
        config.validate()?;

        info!(
            cache_enabled = config.cache.enabled,
            cache_backend = if config.cache.redis_url.is_some() { "redis" } else { "memory" },
            max_dimension = config.image.max_dimension,
            recognition_timeout_secs = config.recognition.timeout_secs,
            "Service configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `ConfigInvalid` naming the first offending setting
    pub fn validate(&self) -> AppResult<()> {
        if self.image.max_dimension == 0 {
            return Err(AppError::config_invalid(
                "IMAGE_MAX_DIMENSION must be greater than zero",
            ));
        }
        if self.image.max_decode_dimension < self.image.max_dimension {
            return Err(AppError::config_invalid(format!(
                "IMAGE_MAX_DECODE_DIMENSION must be at least IMAGE_MAX_DIMENSION ({})",
                self.image.max_dimension
            )));
        }
        if !(1..=100).contains(&self.image.jpeg_quality) {
            return Err(AppError::config_invalid(format!(
                "IMAGE_JPEG_QUALITY must be within 1..=100, got {}",
                self.image.jpeg_quality
            )));
        }
        if self.cache.enable_background_cleanup && self.cache.cleanup_interval_secs == 0 {
            return Err(AppError::config_invalid(
                "CACHE_CLEANUP_INTERVAL_SECS must be greater than zero",
            ));
        }
        if self.recognition.timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "RECOGNITION_TIMEOUT_SECS must be greater than zero",
            ));
        }
        let threshold = self.recognition.low_confidence_threshold;
        if !(0.0..=MAX_CONFIDENCE).contains(&threshold) {
            return Err(AppError::config_invalid(format!(
                "RECOGNITION_LOW_CONFIDENCE_THRESHOLD must be within 0..=100, got {threshold}"
            )));
        }
        Ok(())
    }
}
