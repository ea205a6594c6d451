// ABOUTME: Main library entry point for the HawkerLens meal analysis service
// ABOUTME: Recognition validation, dedup caching, and personalized meal health ratings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # HawkerLens
//!
//! Turns a meal photo (or a short description) into a validated nutrition
//! estimate and a personalized health rating.
//!
//! ## Features
//!
//! - **Image normalization**: JPEG/PNG/WebP decoded, bounded and re-encoded to a
//!   canonical JPEG whose SHA-256 is the dedup key
//! - **Recognition cache**: namespaced, TTL-tiered, fail-open cache over an
//!   in-memory LRU or Redis backend
//! - **Contract validation**: untrusted recognizer JSON is checked and enriched
//!   before anything reads it
//! - **Daily targets and rating**: Mifflin-St Jeor budget, six-factor weighted
//!   score, traffic-light tier and capped suggestions
//! - **Localization**: English and Simplified Chinese presentation text
//!
//! ## Architecture
//!
//! - **`hawkerlens-core`**: models, validation errors, constants
//! - **`hawkerlens-intelligence`**: pure target and rating algorithms
//! - **this crate**: configuration, logging, cache, imaging, recognition
//!   boundary, localization and the end-to-end pipeline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hawkerlens::config::ServiceConfig;
//! use hawkerlens::errors::AppResult;
//! use hawkerlens::logging;
//!
//! fn main() -> AppResult<()> {
//!     logging::init_from_env()?;
//!     let config = ServiceConfig::from_env()?;
//!     println!("cache enabled: {}", config.cache.enabled);
//!     Ok(())
//! }
//! ```

rust_i18n::i18n!("locales", fallback = "en");

/// Cache layer: providers, namespaced keys, and the recognition cache
pub mod cache;

/// Environment configuration
pub mod config;

/// Platform error type and codes
pub mod errors;

/// Presentation-boundary localization
pub mod i18n;

/// Image decoding, normalization, and content hashing
pub mod imaging;

/// Structured logging setup
pub mod logging;

/// End-to-end meal analysis
pub mod pipeline;

/// Recognizer boundary and payload validation
pub mod recognition;

pub use cache::{Cache, CacheMetrics, CacheProvider, RecognitionCache};
pub use config::ServiceConfig;
pub use errors::{AppError, AppResult, ErrorCode};
pub use i18n::Language;
pub use imaging::{ImageNormalizer, NormalizedImage};
pub use pipeline::{
    MealAnalysis, MealAnalysisPipeline, MealAnalysisRequest, MealInput, RecognitionWarning,
};
pub use recognition::{FoodRecognizer, RecognitionError, RecognitionRequest, RecognitionValidator};
