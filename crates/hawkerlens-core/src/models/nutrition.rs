// ABOUTME: Nutrition range and profile models with enforced range invariants
// ABOUTME: NutritionRange can only exist with finite 0 <= min <= max bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::RangeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated `{min, max}` interval in domain units (kcal, g, mg)
///
/// Fields are private so a range that violates `0 <= min <= max` is never
/// constructed, including when deserializing from a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct NutritionRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for NutritionRange {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl NutritionRange {
    /// Create a range, rejecting negative, non-finite, or inverted bounds
    ///
    /// # Errors
    ///
    /// Returns `RangeError` unless `0 <= min <= max` and both bounds are finite
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(RangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Average of both bounds, the point estimate used for scoring
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl fmt::Display for NutritionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}-{:.0}", self.min, self.max)
    }
}

/// The five tracked nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy (kcal)
    Calories,
    /// Protein (g)
    Protein,
    /// Carbohydrates (g)
    Carbs,
    /// Fat (g)
    Fat,
    /// Sodium (mg)
    Sodium,
}

impl Nutrient {
    /// Every nutrient in payload order
    pub const ALL: [Self; 5] = [
        Self::Calories,
        Self::Protein,
        Self::Carbs,
        Self::Fat,
        Self::Sodium,
    ];

    /// JSON field name inside a `nutrition` object
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
            Self::Sodium => "sodium",
        }
    }

    /// Display unit
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Protein | Self::Carbs | Self::Fat => "g",
            Self::Sodium => "mg",
        }
    }
}

/// Five nutrition ranges describing one food item or a whole meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    /// Energy (kcal)
    pub calories: NutritionRange,
    /// Protein (g)
    pub protein: NutritionRange,
    /// Carbohydrates (g)
    pub carbs: NutritionRange,
    /// Fat (g)
    pub fat: NutritionRange,
    /// Sodium (mg)
    pub sodium: NutritionRange,
}

impl NutritionProfile {
    /// Range for a given nutrient
    #[must_use]
    pub const fn get(&self, nutrient: Nutrient) -> NutritionRange {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Sodium => self.sodium,
        }
    }
}
