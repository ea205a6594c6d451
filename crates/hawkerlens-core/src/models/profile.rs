// ABOUTME: Health profile inputs and derived daily nutrition targets
// ABOUTME: HealthGoal, ActivityLevel, Gender, TrainingType, and DailyTarget definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male gender (higher BMR)
    Male,
    /// Female gender (lower BMR)
    Female,
}

/// Health goal driving calorie adjustment, macro split, and factor weights
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HealthGoal {
    /// Caloric deficit
    LoseWeight,
    /// Caloric surplus with high protein
    GainMuscle,
    /// Blood sugar management
    ControlSugar,
    /// Caloric balance
    Maintain,
}

impl HealthGoal {
    /// Every goal, for exhaustive table checks
    pub const ALL: [Self; 4] = [
        Self::LoseWeight,
        Self::GainMuscle,
        Self::ControlSugar,
        Self::Maintain,
    ];

    /// Kebab-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoseWeight => "lose-weight",
            Self::GainMuscle => "gain-muscle",
            Self::ControlSugar => "control-sugar",
            Self::Maintain => "maintain",
        }
    }
}

impl fmt::Display for HealthGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    Light,
    /// Exercise 3-5 days/week
    Moderate,
    /// Exercise 6-7 days/week
    Active,
}

/// Training style reported by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    /// Resistance / weight training
    Strength,
    /// Endurance / cardio training
    Cardio,
    /// Mixed modalities
    Mixed,
}

/// User health profile, read-only to the rating pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender for the BMR constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Health goal
    pub goal: HealthGoal,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Explicit daily protein target (g), overrides the per-kg rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_target: Option<f64>,
    /// Explicit daily carbohydrate target (g), overrides the percentage rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carb_target: Option<f64>,
    /// Training style, affects protein per kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_type: Option<TrainingType>,
}

impl HealthProfile {
    /// Create a profile with the required fields
    #[must_use]
    pub const fn new(
        height_cm: f64,
        weight_kg: f64,
        goal: HealthGoal,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            height_cm,
            weight_kg,
            age: None,
            gender: None,
            goal,
            activity_level,
            protein_target: None,
            carb_target: None,
            training_type: None,
        }
    }

    /// Set age
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set gender
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Set an explicit protein target (g)
    #[must_use]
    pub fn with_protein_target(mut self, grams: f64) -> Self {
        self.protein_target = Some(grams);
        self
    }

    /// Set an explicit carbohydrate target (g)
    #[must_use]
    pub fn with_carb_target(mut self, grams: f64) -> Self {
        self.carb_target = Some(grams);
        self
    }

    /// Set training type
    #[must_use]
    pub fn with_training_type(mut self, training_type: TrainingType) -> Self {
        self.training_type = Some(training_type);
        self
    }
}

/// Daily calorie and macro budget derived from a [`HealthProfile`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTarget {
    /// Energy (kcal/day)
    pub calories: f64,
    /// Protein (g/day)
    pub protein: f64,
    /// Carbohydrates (g/day)
    pub carbs: f64,
    /// Fat (g/day)
    pub fat: f64,
    /// Sodium (mg/day)
    pub sodium: f64,
}
