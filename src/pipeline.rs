// ABOUTME: End-to-end meal analysis: normalize, dedup via cache, recognize, validate, rate
// ABOUTME: One call per inbound meal; every step runs sequentially inside a tracing span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal analysis pipeline
//!
//! ```text
//! photo ──► ImageNormalizer ──► hash ─┐
//! text ───► sha256("text:" + text) ───┴► RecognitionCache ──hit──┐
//!                                            │ miss              │
//!                                            ▼                   │
//!                          FoodRecognizer (deadline) ──► RecognitionValidator
//!                                            │ cache set         │
//!                                            ▼                   ▼
//!                          DailyTargetCalculator ──► RatingEngine ──► MealAnalysis
//! ```
//!
//! Two concurrent submissions of the same content may both miss and both
//! call the recognizer; the later cache write wins.

use crate::cache::{Cache, CacheProvider, RecognitionCache};
use crate::config::{RecognitionConfig, ServiceConfig};
use crate::errors::AppResult;
use crate::i18n::{localize_rating, localize_warning, Language, LocalizedRating};
use crate::imaging::{sha256_hex, ImageNormalizer};
use crate::recognition::{
    FoodRecognizer, RecognitionError, RecognitionRequest, RecognitionValidator,
};
use chrono::NaiveTime;
use hawkerlens_core::models::{DailyTarget, HealthProfile, HealthRating, RecognitionResult};
use hawkerlens_intelligence::{DailyTargetCalculator, RatingEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// What the user sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealInput {
    /// Raw photo bytes (JPEG, PNG or WebP)
    Photo(Vec<u8>),
    /// Free-text description of the meal
    Description(String),
}

/// One meal analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealAnalysisRequest {
    /// Photo or description
    pub input: MealInput,
    /// Requesting user, if known
    pub user_id: Option<String>,
    /// Cache under `hash:user_id` instead of the shared `hash` entry
    pub personalized: bool,
    /// Reply language; the configured default when absent
    pub language: Option<Language>,
    /// Local time of the meal
    pub meal_time: NaiveTime,
}

impl MealAnalysisRequest {
    /// Request for a photo
    #[must_use]
    pub const fn photo(bytes: Vec<u8>, meal_time: NaiveTime) -> Self {
        Self {
            input: MealInput::Photo(bytes),
            user_id: None,
            personalized: false,
            language: None,
            meal_time,
        }
    }

    /// Request for a text description
    #[must_use]
    pub const fn description(text: String, meal_time: NaiveTime) -> Self {
        Self {
            input: MealInput::Description(text),
            user_id: None,
            personalized: false,
            language: None,
            meal_time,
        }
    }

    /// Attach the requesting user
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Cache the recognition per user
    #[must_use]
    pub const fn personalized(mut self) -> Self {
        self.personalized = true;
        self
    }

    /// Override the reply language
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    fn cache_user(&self) -> Option<&str> {
        if self.personalized {
            self.user_id.as_deref()
        } else {
            None
        }
    }
}

/// Soft issue the caller should surface without failing the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecognitionWarning {
    /// The recognizer was unsure about one item
    LowConfidence {
        /// Item name
        food: String,
        /// Reported confidence (0-100)
        confidence: f64,
    },
}

/// Outcome of one successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAnalysis {
    /// Correlation id, also on every log line of the analysis
    pub analysis_id: Uuid,
    /// Dedup hash of the normalized photo or description
    pub content_hash: String,
    /// Validated recognition
    pub recognition: RecognitionResult,
    /// Budget the meal was rated against
    pub daily_target: DailyTarget,
    /// Score, tier, factors and suggestions
    pub rating: HealthRating,
    /// Whether the recognition came from the cache
    pub from_cache: bool,
    /// Soft warnings
    pub warnings: Vec<RecognitionWarning>,
}

impl MealAnalysis {
    /// Rating rendered for presentation
    #[must_use]
    pub fn localized_rating(&self, language: Language) -> LocalizedRating {
        localize_rating(&self.rating, language)
    }

    /// Warning sentences for presentation
    #[must_use]
    pub fn localized_warnings(&self, language: Language) -> Vec<String> {
        self.warnings
            .iter()
            .map(|warning| localize_warning(warning, language))
            .collect()
    }
}

/// Content hash plus the recognizer call it keys
struct PreparedInput {
    content_hash: String,
    request: RecognitionRequest,
}

/// Meal analysis pipeline
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct MealAnalysisPipeline<C: CacheProvider = Cache> {
    normalizer: ImageNormalizer,
    recognizer: Arc<dyn FoodRecognizer>,
    cache: RecognitionCache<C>,
    targets: DailyTargetCalculator,
    rating: RatingEngine,
    config: RecognitionConfig,
}

impl MealAnalysisPipeline<Cache> {
    /// Build a pipeline from service configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the cache backend cannot be initialized
    pub async fn from_config(
        config: &ServiceConfig,
        recognizer: Arc<dyn FoodRecognizer>,
    ) -> AppResult<Self> {
        let cache = RecognitionCache::from_config(config.cache.clone()).await?;
        info!(
            recognizer = recognizer.name(),
            cache_enabled = cache.is_enabled(),
            timeout_secs = config.recognition.timeout_secs,
            "Meal analysis pipeline ready"
        );
        Ok(Self::new(recognizer, cache)
            .with_normalizer(ImageNormalizer::new(config.image.clone()))
            .with_recognition_config(config.recognition.clone()))
    }
}

impl<C: CacheProvider> MealAnalysisPipeline<C> {
    /// Pipeline with default normalizer, calculator, engine and recognition settings
    #[must_use]
    pub fn new(recognizer: Arc<dyn FoodRecognizer>, cache: RecognitionCache<C>) -> Self {
        Self {
            normalizer: ImageNormalizer::default(),
            recognizer,
            cache,
            targets: DailyTargetCalculator::default(),
            rating: RatingEngine::default(),
            config: RecognitionConfig::default(),
        }
    }

    /// Replace the image normalizer
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Replace the daily target calculator
    #[must_use]
    pub fn with_target_calculator(mut self, targets: DailyTargetCalculator) -> Self {
        self.targets = targets;
        self
    }

    /// Replace the rating engine
    #[must_use]
    pub fn with_rating_engine(mut self, rating: RatingEngine) -> Self {
        self.rating = rating;
        self
    }

    /// Replace deadline, warning threshold and default language
    #[must_use]
    pub fn with_recognition_config(mut self, config: RecognitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Recognition cache in use
    #[must_use]
    pub const fn cache(&self) -> &RecognitionCache<C> {
        &self.cache
    }

    /// Analyze one meal for one user
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError` when the profile, input, recognizer call or
    /// recognizer payload is unusable. Cache failures never surface here.
    pub async fn analyze(
        &self,
        request: MealAnalysisRequest,
        profile: &HealthProfile,
    ) -> Result<MealAnalysis, RecognitionError> {
        let analysis_id = Uuid::new_v4();
        let span = info_span!(
            "meal_analysis",
            %analysis_id,
            content_hash = field::Empty,
            from_cache = field::Empty,
        );
        self.run(analysis_id, request, profile)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        analysis_id: Uuid,
        request: MealAnalysisRequest,
        profile: &HealthProfile,
    ) -> Result<MealAnalysis, RecognitionError> {
        let daily_target = self.targets.compute(profile)?;
        let language = request.language.unwrap_or(self.config.default_language);
        let cache_user = request.cache_user();

        let prepared = self.prepare(&request.input, language, request.meal_time)?;
        let content_hash = prepared.content_hash;
        let span = Span::current();
        span.record("content_hash", content_hash.as_str());

        let (recognition, from_cache) =
            match self.cache.get_food_recognition(&content_hash, cache_user).await {
                // A hit keeps the meal context recorded by the first analysis
                Some(cached) => (cached, true),
                None => {
                    let fresh = self.recognize(&prepared.request).await?;
                    self.cache
                        .set_food_recognition(&content_hash, cache_user, &fresh)
                        .await;
                    (fresh, false)
                }
            };
        span.record("from_cache", from_cache);

        let rating = self
            .rating
            .evaluate(&recognition, &daily_target, profile.goal);

        let warnings: Vec<RecognitionWarning> = recognition
            .low_confidence_items(self.config.low_confidence_threshold)
            .map(|food| RecognitionWarning::LowConfidence {
                food: food.name.clone(),
                confidence: food.confidence,
            })
            .collect();

        info!(
            foods = recognition.foods().len(),
            meal_context = recognition.meal_context().as_str(),
            score = rating.score,
            tier = rating.overall.as_str(),
            warnings = warnings.len(),
            "Meal analyzed"
        );

        Ok(MealAnalysis {
            analysis_id,
            content_hash,
            recognition,
            daily_target,
            rating,
            from_cache,
            warnings,
        })
    }

    fn prepare(
        &self,
        input: &MealInput,
        language: Language,
        meal_time: NaiveTime,
    ) -> Result<PreparedInput, RecognitionError> {
        match input {
            MealInput::Photo(bytes) => {
                let image = self.normalizer.normalize(bytes)?;
                Ok(PreparedInput {
                    content_hash: image.hash,
                    request: RecognitionRequest::for_image(image.buffer, language, meal_time),
                })
            }
            MealInput::Description(text) => {
                let collapsed = collapse_description(text);
                if collapsed.is_empty() {
                    return Err(RecognitionError::EmptyDescription);
                }
                Ok(PreparedInput {
                    content_hash: description_hash(&collapsed),
                    request: RecognitionRequest::for_description(
                        text.trim().to_owned(),
                        language,
                        meal_time,
                    ),
                })
            }
        }
    }

    async fn recognize(
        &self,
        request: &RecognitionRequest,
    ) -> Result<RecognitionResult, RecognitionError> {
        let recognizer = self.recognizer.name();
        let secs = self.config.timeout_secs;
        debug!(recognizer, "Cache miss, calling recognizer");

        let outcome = timeout(self.config.timeout(), self.recognizer.recognize(request))
            .await
            .map_err(|_| {
                warn!(recognizer, timeout_secs = secs, "Recognizer timed out");
                RecognitionError::Timeout { secs }
            })?;
        let raw = outcome.map_err(|e| {
            warn!(recognizer, error = %e, "Recognizer failed");
            RecognitionError::Recognizer(e)
        })?;

        RecognitionValidator::validate(&raw, request.meal_time_hint).map_err(|e| {
            warn!(recognizer, error = %e, "Recognizer payload rejected");
            RecognitionError::Validation(e)
        })
    }
}

/// Lower-cased description with runs of whitespace collapsed to one space
fn collapse_description(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Dedup hash for a text description
#[must_use]
pub fn description_hash(collapsed: &str) -> String {
    sha256_hex(format!("text:{collapsed}").as_bytes())
}
