// ABOUTME: Core data models for meal recognition and personalized rating
// ABOUTME: Re-exports nutrition, recognition, profile, and rating types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Nutrition ranges and per-item/aggregate nutrition profiles
pub mod nutrition;
/// Health profile inputs and derived daily targets
pub mod profile;
/// Health rating output: factors, tiers, and suggestion keys
pub mod rating;
/// Recognized food items and validated recognition results
pub mod recognition;

pub use nutrition::{Nutrient, NutritionProfile, NutritionRange};
pub use profile::{ActivityLevel, DailyTarget, Gender, HealthGoal, HealthProfile, TrainingType};
pub use rating::{
    Factor, FactorEvaluation, FactorMessage, FactorStatus, HealthRating, RatingTier, Suggestion,
    SuggestionKey,
};
pub use recognition::{FoodItem, GiLevel, MealContext, NutriGrade, RecognitionResult};
