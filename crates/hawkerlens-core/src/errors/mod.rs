// ABOUTME: Validation error taxonomy for AI-returned nutrition payloads
// ABOUTME: Distinguishes empty results, incomplete items, and invalid numeric ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Validation errors produced while turning an untrusted recognition payload
//! into a [`RecognitionResult`](crate::models::RecognitionResult).
//!
//! All three variants mean the model answered, but the answer is unusable.
//! They are surfaced to the user and never retried automatically.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contract violation in a recognition payload; the first failing rule wins
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// `foods` is missing, not an array, or empty
    #[error("no food detected in recognition result")]
    NoFoodDetected,

    /// A food item (or the totals block) lacks a required field
    #[error("incomplete food information: {field}{}", item.map_or_else(String::new, |i| format!(" (item {i})")))]
    IncompleteFoodInformation {
        /// Index of the offending food item, `None` for `totalNutrition`
        item: Option<usize>,
        /// JSON path of the missing field
        field: String,
    },

    /// A nutrition range is inverted, degenerate, or negative
    #[error("invalid nutrition range for {field}: min={min}, max={max}")]
    InvalidNutritionRange {
        /// JSON path of the offending range
        field: String,
        /// Reported lower bound
        min: f64,
        /// Reported upper bound
        max: f64,
    },
}

impl ValidationError {
    /// Stable key used to resolve a localized user-facing message
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::NoFoodDetected => "error.no_food_detected",
            Self::IncompleteFoodInformation { .. } => "error.incomplete_food_information",
            Self::InvalidNutritionRange { .. } => "error.invalid_nutrition_range",
        }
    }
}

/// Rejected bounds when constructing a [`NutritionRange`](crate::models::NutritionRange)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("nutrition range must satisfy 0 <= min <= max with finite bounds (min={min}, max={max})")]
pub struct RangeError {
    /// Rejected lower bound
    pub min: f64,
    /// Rejected upper bound
    pub max: f64,
}

/// Structural violation of a recognition result assembled in code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecognitionShapeError {
    /// A recognition result must contain at least one food item
    #[error("recognition result must contain at least one food item")]
    EmptyFoods,
}
