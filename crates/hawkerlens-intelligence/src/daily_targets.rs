// ABOUTME: Daily calorie and macro target calculation from a health profile
// ABOUTME: Mifflin-St Jeor BMR x activity factor, goal shift, and goal-based macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily Target Calculator
//!
//! Derives a deterministic [`DailyTarget`] from a [`HealthProfile`]:
//!
//! 1. BMR (Mifflin-St Jeor) x activity factor, shifted by goal
//! 2. Protein from an explicit target or `weight x g/kg` by goal and training
//! 3. Carbohydrates from an explicit target or a goal-based share of calories
//! 4. Fat fills the remaining calories, never below the floor
//! 5. Sodium is the WHO reference regardless of profile

use crate::config::{BmrConfig, MacroTargetConfig, TargetCalculatorConfig};
use crate::error::ProfileError;
use hawkerlens_core::constants::nutrition::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use hawkerlens_core::models::{DailyTarget, Gender, HealthGoal, HealthProfile, TrainingType};
use std::ops::RangeInclusive;

/// Upper bound for height (cm) and weight (kg)
const MAX_BODY_METRIC: f64 = 300.0;
/// Age range the BMR formula is validated for
const VALID_AGE_RANGE: RangeInclusive<u32> = 10..=120;

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
/// - Unspecified: midpoint of both
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Option<Gender>,
    config: &BmrConfig,
) -> f64 {
    let gender_constant = match gender {
        Some(Gender::Male) => config.msj_male_constant,
        Some(Gender::Female) => config.msj_female_constant,
        None => config.unspecified_gender_constant(),
    };

    config.msj_weight_coef * weight_kg
        + config.msj_height_coef * height_cm
        + config.msj_age_coef * f64::from(age)
        + gender_constant
}

/// Protein requirement in g/kg for a goal and training style
#[must_use]
pub const fn protein_g_per_kg(
    goal: HealthGoal,
    training_type: Option<TrainingType>,
    config: &MacroTargetConfig,
) -> f64 {
    match (goal, training_type) {
        (HealthGoal::GainMuscle, Some(TrainingType::Strength)) => {
            config.protein_gain_muscle_strength_g_per_kg
        }
        (HealthGoal::GainMuscle, _) => config.protein_gain_muscle_g_per_kg,
        (HealthGoal::LoseWeight, _) => config.protein_lose_weight_g_per_kg,
        (HealthGoal::ControlSugar, _) => config.protein_control_sugar_g_per_kg,
        (HealthGoal::Maintain, Some(_)) => config.protein_maintain_training_g_per_kg,
        (HealthGoal::Maintain, None) => config.protein_maintain_g_per_kg,
    }
}

/// Pure daily target calculator
#[derive(Debug, Clone, Default)]
pub struct DailyTargetCalculator {
    config: TargetCalculatorConfig,
}

impl DailyTargetCalculator {
    /// Create a calculator with custom coefficients
    #[must_use]
    pub const fn new(config: TargetCalculatorConfig) -> Self {
        Self { config }
    }

    /// Coefficients in use
    #[must_use]
    pub const fn config(&self) -> &TargetCalculatorConfig {
        &self.config
    }

    /// Compute the daily target for a profile
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if height, weight, or age fall outside the ranges
    /// the formula is validated for, or an explicit target is negative
    pub fn compute(&self, profile: &HealthProfile) -> Result<DailyTarget, ProfileError> {
        validate_profile(profile)?;

        let age = profile.age.unwrap_or(self.config.bmr.default_age);
        let bmr = calculate_mifflin_st_jeor(
            profile.weight_kg,
            profile.height_cm,
            age,
            profile.gender,
            &self.config.bmr,
        );
        let tdee = bmr * self.config.activity_factors.factor_for(profile.activity_level);
        let calories = (tdee + self.config.macros.calorie_shift(profile.goal)).max(0.0);

        let protein = profile.protein_target.unwrap_or_else(|| {
            profile.weight_kg
                * protein_g_per_kg(profile.goal, profile.training_type, &self.config.macros)
        });
        let carbs = profile.carb_target.unwrap_or_else(|| {
            calories * self.config.macros.carb_percent(profile.goal) / KCAL_PER_G_CARBS
        });

        let remaining = calories - protein * KCAL_PER_G_PROTEIN - carbs * KCAL_PER_G_CARBS;
        let fat = (remaining / KCAL_PER_G_FAT).max(self.config.macros.fat_floor_g);

        Ok(DailyTarget {
            calories,
            protein,
            carbs,
            fat,
            sodium: self.config.macros.sodium_mg,
        })
    }
}

fn in_body_range(value: f64) -> bool {
    value > 0.0 && value <= MAX_BODY_METRIC
}

fn validate_profile(profile: &HealthProfile) -> Result<(), ProfileError> {
    if !in_body_range(profile.height_cm) {
        return Err(ProfileError::InvalidHeight(profile.height_cm));
    }
    if !in_body_range(profile.weight_kg) {
        return Err(ProfileError::InvalidWeight(profile.weight_kg));
    }
    if let Some(age) = profile.age {
        if !VALID_AGE_RANGE.contains(&age) {
            return Err(ProfileError::InvalidAge(age));
        }
    }
    let explicit = [
        ("protein", profile.protein_target),
        ("carbs", profile.carb_target),
    ];
    for (field, target) in explicit {
        if let Some(value) = target {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidTarget { field, value });
            }
        }
    }
    Ok(())
}
