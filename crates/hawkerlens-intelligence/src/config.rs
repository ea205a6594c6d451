// ABOUTME: Coefficients for the daily target calculator and parameters for meal rating
// ABOUTME: BMR, activity factors, goal-based macro rules, and per-meal calorie shares
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010). Exercise Physiology
//! - Sodium: WHO (2012) Guideline: Sodium intake for adults and children

use crate::error::ConfigError;
use hawkerlens_core::constants::nutrition::{MIN_DAILY_FAT_G, WHO_SODIUM_REFERENCE_MG};
use hawkerlens_core::models::{ActivityLevel, HealthGoal, MealContext};
use serde::{Deserialize, Serialize};

/// Daily target calculator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetCalculatorConfig {
    /// Basal Metabolic Rate (BMR) formula coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-dependent calorie shift and macro rules
    pub macros: MacroTargetConfig,
}

impl TargetCalculatorConfig {
    /// Validate all sub-configurations
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for non-positive activity factors
    /// or carbohydrate percentages outside 0.0-1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.activity_factors.validate()?;
        self.macros.validate()
    }
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Age assumed when the profile has none
    pub default_age: u32,
}

impl BmrConfig {
    /// Constant used when gender is unknown: midpoint of male and female constants
    #[must_use]
    pub fn unspecified_gender_constant(&self) -> f64 {
        (self.msj_male_constant + self.msj_female_constant) / 2.0
    }
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            default_age: 30,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub light: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderate: f64,
    /// Very active (6-7 days/week): 1.725
    pub active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            ("sedentary", self.sedentary),
            ("light", self.light),
            ("moderate", self.moderate),
            ("active", self.active),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{name} activity factor must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
        }
    }
}

/// Goal-dependent calorie shift and macro rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargetConfig {
    /// Calorie shift for lose-weight (kcal/day)
    pub lose_weight_calorie_shift: f64,
    /// Calorie shift for gain-muscle (kcal/day)
    pub gain_muscle_calorie_shift: f64,
    /// Protein (g/kg) for lose-weight
    pub protein_lose_weight_g_per_kg: f64,
    /// Protein (g/kg) for gain-muscle with strength training
    pub protein_gain_muscle_strength_g_per_kg: f64,
    /// Protein (g/kg) for gain-muscle with any other or no training
    pub protein_gain_muscle_g_per_kg: f64,
    /// Protein (g/kg) for control-sugar
    pub protein_control_sugar_g_per_kg: f64,
    /// Protein (g/kg) for maintain without training
    pub protein_maintain_g_per_kg: f64,
    /// Protein (g/kg) for maintain with any training type
    pub protein_maintain_training_g_per_kg: f64,
    /// Carbohydrate share of calories for gain-muscle
    pub carbs_gain_muscle_pct: f64,
    /// Carbohydrate share of calories for lose-weight
    pub carbs_lose_weight_pct: f64,
    /// Carbohydrate share of calories for control-sugar
    pub carbs_control_sugar_pct: f64,
    /// Carbohydrate share of calories for maintain
    pub carbs_maintain_pct: f64,
    /// Floor for daily fat (g)
    pub fat_floor_g: f64,
    /// Daily sodium reference (mg), independent of profile
    pub sodium_mg: f64,
}

impl MacroTargetConfig {
    /// Calorie shift applied after TDEE
    #[must_use]
    pub const fn calorie_shift(&self, goal: HealthGoal) -> f64 {
        match goal {
            HealthGoal::LoseWeight => self.lose_weight_calorie_shift,
            HealthGoal::GainMuscle => self.gain_muscle_calorie_shift,
            HealthGoal::ControlSugar | HealthGoal::Maintain => 0.0,
        }
    }

    /// Carbohydrate share of calories
    #[must_use]
    pub const fn carb_percent(&self, goal: HealthGoal) -> f64 {
        match goal {
            HealthGoal::GainMuscle => self.carbs_gain_muscle_pct,
            HealthGoal::LoseWeight => self.carbs_lose_weight_pct,
            HealthGoal::ControlSugar => self.carbs_control_sugar_pct,
            HealthGoal::Maintain => self.carbs_maintain_pct,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for goal in HealthGoal::ALL {
            let pct = self.carb_percent(goal);
            if !(0.0..=1.0).contains(&pct) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{goal} carbohydrate share must be between 0.0 and 1.0, got {pct}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MacroTargetConfig {
    fn default() -> Self {
        Self {
            lose_weight_calorie_shift: -500.0,
            gain_muscle_calorie_shift: 300.0,
            protein_lose_weight_g_per_kg: 1.6,
            protein_gain_muscle_strength_g_per_kg: 2.2,
            protein_gain_muscle_g_per_kg: 2.0,
            protein_control_sugar_g_per_kg: 1.2,
            protein_maintain_g_per_kg: 1.0,
            protein_maintain_training_g_per_kg: 1.4,
            carbs_gain_muscle_pct: 0.50,
            carbs_lose_weight_pct: 0.35,
            carbs_control_sugar_pct: 0.30,
            carbs_maintain_pct: 0.45,
            fat_floor_g: MIN_DAILY_FAT_G,
            sodium_mg: WHO_SODIUM_REFERENCE_MG,
        }
    }
}

/// Expected share of daily calories for each meal slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCalorieShareConfig {
    /// Breakfast share (0.0-1.0), default 25%
    pub breakfast: f64,
    /// Lunch share (0.0-1.0), default 35%
    pub lunch: f64,
    /// Dinner share (0.0-1.0), default 30%
    pub dinner: f64,
    /// Snack share (0.0-1.0), default 10%
    pub snack: f64,
}

impl MealCalorieShareConfig {
    /// Share for a meal slot
    #[must_use]
    pub const fn share_for(&self, context: MealContext) -> f64 {
        match context {
            MealContext::Breakfast => self.breakfast,
            MealContext::Lunch => self.lunch,
            MealContext::Dinner => self.dinner,
            MealContext::Snack => self.snack,
        }
    }

    /// Validate that shares are within valid range (0.0-1.0)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` if any share is outside 0.0-1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shares = [
            ("breakfast", self.breakfast),
            ("lunch", self.lunch),
            ("dinner", self.dinner),
            ("snack", self.snack),
        ];
        for (name, value) in shares {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{name} share must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MealCalorieShareConfig {
    fn default() -> Self {
        Self {
            breakfast: 0.25,
            lunch: 0.35,
            dinner: 0.30,
            snack: 0.10,
        }
    }
}

/// Rating engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Expected calorie share per meal slot
    pub meal_shares: MealCalorieShareConfig,
    /// Maximum number of suggestions returned
    pub max_suggestions: usize,
}

impl RatingConfig {
    /// Validate rating parameters
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for invalid meal shares or a zero suggestion cap
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.meal_shares.validate()?;
        if self.max_suggestions == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_suggestions must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            meal_shares: MealCalorieShareConfig::default(),
            max_suggestions: 4,
        }
    }
}
