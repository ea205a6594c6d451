// ABOUTME: Recognized food items and validated recognition results
// ABOUTME: RecognitionResult always holds at least one food item and valid ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::NutritionProfile;
use crate::errors::RecognitionShapeError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Singapore HPB front-of-pack grade for sugar and saturated fat
///
/// Ordering follows severity: `A < B < C < D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutriGrade {
    /// Lowest sugar and saturated fat
    A,
    /// Low sugar and saturated fat
    B,
    /// High sugar or saturated fat
    C,
    /// Highest sugar or saturated fat
    D,
}

impl NutriGrade {
    /// Parse a grade letter, ignoring case and surrounding whitespace
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    /// Grade letter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// Qualitative glycemic index bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiLevel {
    /// GI 55 or less
    Low,
    /// GI 56-69
    Medium,
    /// GI 70 or more
    High,
}

impl GiLevel {
    /// Parse a GI bucket name, ignoring case
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Meal slot used to scale the expected share of daily calories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealContext {
    /// 06:00-09:59
    Breakfast,
    /// 11:00-13:59
    Lunch,
    /// 17:00-20:59
    Dinner,
    /// Any other time
    Snack,
}

impl MealContext {
    /// Parse a meal context name, ignoring case
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" => Some(Self::Snack),
            _ => None,
        }
    }

    /// Bucket a local meal time into a meal slot
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        match time.hour() {
            6..=9 => Self::Breakfast,
            11..=13 => Self::Lunch,
            17..=20 => Self::Dinner,
            _ => Self::Snack,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

/// One recognized food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Canonical (English) name
    pub name: String,
    /// Name in the user's language; backfilled with `name` when absent
    pub name_local: String,
    /// Model confidence on a 0-100 scale
    pub confidence: f64,
    /// Portion description (e.g. "1 plate")
    pub portion: String,
    /// Estimated nutrition for this item
    pub nutrition: NutritionProfile,
    /// Nutri-Grade, when the model supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutri_grade: Option<NutriGrade>,
    /// Glycemic index bucket, when the model supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gi_level: Option<GiLevel>,
    /// Whether the dish is typical hawker-centre fare
    #[serde(default)]
    pub is_hawker_food: bool,
    /// Model-supplied healthier-choice tip for this dish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_tip: Option<String>,
}

/// Validated structured estimate for one meal
///
/// Only obtainable through [`RecognitionResult::new`] or deserialization,
/// both of which reject an empty food list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecognitionResultRepr")]
pub struct RecognitionResult {
    foods: Vec<FoodItem>,
    total_nutrition: NutritionProfile,
    meal_context: MealContext,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionResultRepr {
    foods: Vec<FoodItem>,
    total_nutrition: NutritionProfile,
    meal_context: MealContext,
}

impl TryFrom<RecognitionResultRepr> for RecognitionResult {
    type Error = RecognitionShapeError;

    fn try_from(repr: RecognitionResultRepr) -> Result<Self, Self::Error> {
        Self::new(repr.foods, repr.total_nutrition, repr.meal_context)
    }
}

impl RecognitionResult {
    /// Assemble a result from already-validated parts
    ///
    /// # Errors
    ///
    /// Returns `RecognitionShapeError::EmptyFoods` if `foods` is empty
    pub fn new(
        foods: Vec<FoodItem>,
        total_nutrition: NutritionProfile,
        meal_context: MealContext,
    ) -> Result<Self, RecognitionShapeError> {
        if foods.is_empty() {
            return Err(RecognitionShapeError::EmptyFoods);
        }
        Ok(Self {
            foods,
            total_nutrition,
            meal_context,
        })
    }

    /// Recognized items (never empty)
    #[must_use]
    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Aggregate nutrition across all items
    #[must_use]
    pub const fn total_nutrition(&self) -> &NutritionProfile {
        &self.total_nutrition
    }

    /// Meal slot
    #[must_use]
    pub const fn meal_context(&self) -> MealContext {
        self.meal_context
    }

    /// Items whose confidence falls below `threshold`
    pub fn low_confidence_items(&self, threshold: f64) -> impl Iterator<Item = &FoodItem> {
        self.foods
            .iter()
            .filter(move |food| food.confidence < threshold)
    }

    /// Worst Nutri-Grade across items that carry one
    #[must_use]
    pub fn worst_nutri_grade(&self) -> Option<NutriGrade> {
        self.foods.iter().filter_map(|food| food.nutri_grade).max()
    }

    /// Whether any item is tagged high-GI
    #[must_use]
    pub fn has_high_gi(&self) -> bool {
        self.foods
            .iter()
            .any(|food| food.gi_level == Some(GiLevel::High))
    }

    /// Whether any item is hawker fare
    #[must_use]
    pub fn has_hawker_food(&self) -> bool {
        self.foods.iter().any(|food| food.is_hawker_food)
    }
}
