// ABOUTME: Boundary trait for the external vision/text food recognizer
// ABOUTME: Requests carry a photo or description, language, and meal time hint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::i18n::Language;
use async_trait::async_trait;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One call to the recognizer
///
/// Exactly one of `image` and `description` is set when built through the
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionRequest {
    /// Normalized JPEG bytes
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
    /// Free-text meal description
    pub description: Option<String>,
    /// Language for `nameLocal` and tips
    pub language: Language,
    /// Local time of the meal
    pub meal_time_hint: NaiveTime,
}

impl RecognitionRequest {
    /// Request for a normalized photo
    #[must_use]
    pub const fn for_image(image: Vec<u8>, language: Language, meal_time_hint: NaiveTime) -> Self {
        Self {
            image: Some(image),
            description: None,
            language,
            meal_time_hint,
        }
    }

    /// Request for a text description
    #[must_use]
    pub const fn for_description(
        description: String,
        language: Language,
        meal_time_hint: NaiveTime,
    ) -> Self {
        Self {
            image: None,
            description: Some(description),
            language,
            meal_time_hint,
        }
    }
}

/// External recognizer producing untrusted JSON
///
/// The payload is expected to match the recognition result shape
/// (`foods`, `totalNutrition`, optional `mealContext`) but is validated
/// before anything else reads it. Model and prompt choices live behind
/// implementations of this trait.
#[async_trait]
pub trait FoodRecognizer: Send + Sync {
    /// Identifier for logs (e.g. "gemini-vision")
    fn name(&self) -> &'static str;

    /// Recognize the meal in a photo or description
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the recognizer cannot be reached or fails
    async fn recognize(&self, request: &RecognitionRequest) -> Result<Value, AppError>;
}
