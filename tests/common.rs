// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Recognizer payloads, synthesized images, stub recognizers, and instrumented cache backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `hawkerlens`
//!
//! Each integration test binary includes this module with `mod common;` and
//! uses the subset it needs.

use async_trait::async_trait;
use hawkerlens::cache::memory::InMemoryCache;
use hawkerlens::cache::{CacheConfig, CacheKey, CacheProvider};
use hawkerlens::errors::{AppError, AppResult};
use hawkerlens::recognition::{FoodRecognizer, RecognitionRequest};
use hawkerlens_core::models::{ActivityLevel, Gender, HealthGoal, HealthProfile};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Recognizer payloads
// ============================================================================

pub fn range(min: f64, max: f64) -> Value {
    json!({ "min": min, "max": max })
}

/// Nutrition object from `(min, max)` pairs in calories, protein, carbs, fat, sodium order
pub fn nutrition(
    calories: (f64, f64),
    protein: (f64, f64),
    carbs: (f64, f64),
    fat: (f64, f64),
    sodium: (f64, f64),
) -> Value {
    json!({
        "calories": range(calories.0, calories.1),
        "protein": range(protein.0, protein.1),
        "carbs": range(carbs.0, carbs.1),
        "fat": range(fat.0, fat.1),
        "sodium": range(sodium.0, sodium.1),
    })
}

/// Typical plate of Hainanese chicken rice
pub fn chicken_rice_nutrition() -> Value {
    nutrition(
        (550.0, 650.0),
        (25.0, 30.0),
        (70.0, 80.0),
        (18.0, 22.0),
        (1100.0, 1300.0),
    )
}

/// Well-formed single-item payload
pub fn chicken_rice_payload() -> Value {
    json!({
        "foods": [{
            "name": "Hainanese Chicken Rice",
            "nameLocal": "海南鸡饭",
            "confidence": 92,
            "portion": "1 plate",
            "nutrition": chicken_rice_nutrition(),
            "giLevel": "High",
            "isHawkerFood": true,
            "improvementTip": "Ask for less rice"
        }],
        "totalNutrition": chicken_rice_nutrition(),
        "mealContext": "lunch"
    })
}

/// Two items, the drink below the default confidence threshold
pub fn uncertain_drink_payload() -> Value {
    let kopi = nutrition((80.0, 120.0), (1.0, 2.0), (15.0, 20.0), (2.0, 4.0), (20.0, 40.0));
    let toast = nutrition(
        (300.0, 350.0),
        (8.0, 10.0),
        (40.0, 45.0),
        (12.0, 15.0),
        (400.0, 500.0),
    );
    json!({
        "foods": [
            { "name": "Kaya Toast", "confidence": 88, "nutrition": toast, "isHawkerFood": true },
            { "name": "Kopi", "confidence": 45, "nutriGrade": "C", "nutrition": kopi }
        ],
        "totalNutrition": nutrition(
            (380.0, 470.0),
            (9.0, 12.0),
            (55.0, 65.0),
            (14.0, 19.0),
            (420.0, 540.0)
        ),
        "mealContext": "breakfast"
    })
}

// ============================================================================
// Profiles
// ============================================================================

pub fn sample_profile(goal: HealthGoal) -> HealthProfile {
    HealthProfile::new(170.0, 70.0, goal, ActivityLevel::Moderate)
        .with_age(35)
        .with_gender(Gender::Male)
}

// ============================================================================
// Images
// ============================================================================

/// Deterministic gradient so resizing and hashing have real content
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

// ============================================================================
// Recognizers
// ============================================================================

/// Recognizer returning a fixed payload, optionally after a delay
pub struct StubRecognizer {
    response: Value,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubRecognizer {
    pub fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn slow(response: Value, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response,
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FoodRecognizer for StubRecognizer {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn recognize(&self, _request: &RecognitionRequest) -> Result<Value, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.response.clone())
    }
}

/// Recognizer whose upstream is always down
pub struct UnavailableRecognizer;

#[async_trait]
impl FoodRecognizer for UnavailableRecognizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn recognize(&self, _request: &RecognitionRequest) -> Result<Value, AppError> {
        Err(AppError::external_service("vision", "503 Service Unavailable"))
    }
}

// ============================================================================
// Cache backends
// ============================================================================

pub fn test_cache_config() -> CacheConfig {
    CacheConfig {
        max_entries: 100,
        redis_url: None,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    }
}

pub async fn memory_cache() -> InMemoryCache {
    InMemoryCache::new(test_cache_config()).await.unwrap()
}

/// In-memory backend that counts every call it receives
#[derive(Clone)]
pub struct RecordingCache {
    inner: InMemoryCache,
    calls: Arc<AtomicUsize>,
}

impl RecordingCache {
    pub async fn create() -> Self {
        Self {
            inner: memory_cache().await,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheProvider for RecordingCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self {
            inner: InMemoryCache::new(config).await?,
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        self.tick();
        self.inner.set(key, value, ttl).await
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        self.tick();
        self.inner.get(key).await
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.tick();
        self.inner.invalidate(key).await
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        self.tick();
        self.inner.invalidate_pattern(pattern).await
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        self.tick();
        self.inner.exists(key).await
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        self.tick();
        self.inner.ttl(key).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.tick();
        self.inner.health_check().await
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.tick();
        self.inner.clear_all().await
    }
}

/// Backend where every operation fails, as an unreachable store would
#[derive(Clone, Default)]
pub struct BrokenCache;

fn unreachable_store() -> AppError {
    AppError::storage("connection refused")
}

#[async_trait]
impl CacheProvider for BrokenCache {
    async fn new(_config: CacheConfig) -> AppResult<Self> {
        Ok(Self)
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        _key: &CacheKey,
        _value: &T,
        _ttl: Duration,
    ) -> AppResult<()> {
        Err(unreachable_store())
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, _key: &CacheKey) -> AppResult<Option<T>> {
        Err(unreachable_store())
    }

    async fn invalidate(&self, _key: &CacheKey) -> AppResult<()> {
        Err(unreachable_store())
    }

    async fn invalidate_pattern(&self, _pattern: &str) -> AppResult<u64> {
        Err(unreachable_store())
    }

    async fn exists(&self, _key: &CacheKey) -> AppResult<bool> {
        Err(unreachable_store())
    }

    async fn ttl(&self, _key: &CacheKey) -> AppResult<Option<Duration>> {
        Err(unreachable_store())
    }

    async fn health_check(&self) -> AppResult<()> {
        Err(unreachable_store())
    }

    async fn clear_all(&self) -> AppResult<()> {
        Err(unreachable_store())
    }
}
