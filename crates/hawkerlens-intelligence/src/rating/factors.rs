// ABOUTME: The six independent factor evaluators used by the rating engine
// ABOUTME: Calories, sodium, fat, macro balance, Nutri-Grade, and glycemic index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hawkerlens_core::constants::nutrition::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use hawkerlens_core::models::{
    Factor, FactorEvaluation, FactorMessage, FactorStatus, GiLevel, HealthGoal, NutriGrade,
    NutritionProfile, RecognitionResult,
};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Calorie deviation (percent) below which a meal is on target
const CALORIE_GOOD_DEVIATION_PCT: f64 = 10.0;
/// Calorie deviation (percent) below which a meal is moderate
const CALORIE_MODERATE_DEVIATION_PCT: f64 = 20.0;
/// Bonus when the deviation direction matches the goal
const CALORIE_GOAL_ALIGNMENT_BONUS: u8 = 10;

/// Sodium thresholds (mg), each an exclusive upper bound
const SODIUM_LOW_MG: f64 = 500.0;
const SODIUM_GOOD_MG: f64 = 700.0;
const SODIUM_MODERATE_MG: f64 = 1000.0;

/// Fat share of calories (percent), exclusive upper bounds
const FAT_GOOD_PCT: f64 = 25.0;
const FAT_MODERATE_PCT: f64 = 35.0;

/// Ideal macro bands as percent of calories, inclusive
const PROTEIN_BAND_PCT: RangeInclusive<f64> = 15.0..=30.0;
const CARBS_BAND_PCT: RangeInclusive<f64> = 45.0..=65.0;
const FAT_BAND_PCT: RangeInclusive<f64> = 20.0..=35.0;

/// Point estimates of a meal's nutrition and derived calorie shares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealMacros {
    /// Calories (kcal)
    pub calories: f64,
    /// Sodium (mg)
    pub sodium_mg: f64,
    /// Protein share of calories (percent)
    pub protein_pct: f64,
    /// Carbohydrate share of calories (percent)
    pub carbs_pct: f64,
    /// Fat share of calories (percent)
    pub fat_pct: f64,
}

impl MealMacros {
    /// Derive point estimates from range midpoints
    #[must_use]
    pub fn from_profile(nutrition: &NutritionProfile) -> Self {
        let calories = nutrition.calories.midpoint();
        let share = |grams: f64, kcal_per_g: f64| {
            if calories > 0.0 {
                grams * kcal_per_g / calories * 100.0
            } else {
                0.0
            }
        };
        Self {
            calories,
            sodium_mg: nutrition.sodium.midpoint(),
            protein_pct: share(nutrition.protein.midpoint(), KCAL_PER_G_PROTEIN),
            carbs_pct: share(nutrition.carbs.midpoint(), KCAL_PER_G_CARBS),
            fat_pct: share(nutrition.fat.midpoint(), KCAL_PER_G_FAT),
        }
    }
}

/// Calories against the expected share of the daily target
#[must_use]
pub fn evaluate_calories(meal_kcal: f64, expected_kcal: f64, goal: HealthGoal) -> FactorEvaluation {
    let signed_deviation = if expected_kcal > 0.0 {
        (meal_kcal - expected_kcal) / expected_kcal * 100.0
    } else if meal_kcal > 0.0 {
        100.0
    } else {
        0.0
    };
    let deviation = signed_deviation.abs();

    let (status, base_score): (FactorStatus, u8) = if deviation < CALORIE_GOOD_DEVIATION_PCT {
        (FactorStatus::Good, 100)
    } else if deviation < CALORIE_MODERATE_DEVIATION_PCT {
        (FactorStatus::Moderate, 70)
    } else {
        (FactorStatus::Poor, 40)
    };

    let aligned = matches!(
        (goal, signed_deviation.partial_cmp(&0.0)),
        (HealthGoal::LoseWeight, Some(Ordering::Less))
            | (HealthGoal::GainMuscle, Some(Ordering::Greater))
    );
    let score = if aligned {
        base_score.saturating_add(CALORIE_GOAL_ALIGNMENT_BONUS).min(100)
    } else {
        base_score
    };

    let meal = round_u32(meal_kcal);
    let expected = round_u32(expected_kcal);
    let message = if deviation < CALORIE_GOOD_DEVIATION_PCT {
        FactorMessage::CaloriesOnTarget {
            meal_kcal: meal,
            expected_kcal: expected,
        }
    } else if signed_deviation > 0.0 {
        FactorMessage::CaloriesAboveTarget {
            meal_kcal: meal,
            expected_kcal: expected,
            deviation_pct: round_u32(deviation),
        }
    } else {
        FactorMessage::CaloriesBelowTarget {
            meal_kcal: meal,
            expected_kcal: expected,
            deviation_pct: round_u32(deviation),
        }
    };

    FactorEvaluation {
        name: Factor::Calories,
        status,
        message,
        score,
    }
}

/// Absolute sodium thresholds
#[must_use]
pub fn evaluate_sodium(sodium_mg: f64) -> FactorEvaluation {
    let rounded = round_u32(sodium_mg);
    let (status, score, message) = if sodium_mg < SODIUM_LOW_MG {
        (FactorStatus::Good, 100, FactorMessage::SodiumLow { sodium_mg: rounded })
    } else if sodium_mg < SODIUM_GOOD_MG {
        (FactorStatus::Good, 80, FactorMessage::SodiumLow { sodium_mg: rounded })
    } else if sodium_mg < SODIUM_MODERATE_MG {
        (
            FactorStatus::Moderate,
            60,
            FactorMessage::SodiumModerate { sodium_mg: rounded },
        )
    } else {
        (FactorStatus::Poor, 30, FactorMessage::SodiumHigh { sodium_mg: rounded })
    };

    FactorEvaluation {
        name: Factor::Sodium,
        status,
        message,
        score,
    }
}

/// Fat share of total calories
#[must_use]
pub fn evaluate_fat(fat_pct: f64) -> FactorEvaluation {
    let rounded = round_u32(fat_pct);
    let (status, score, message) = if fat_pct < FAT_GOOD_PCT {
        (FactorStatus::Good, 100, FactorMessage::FatLow { fat_pct: rounded })
    } else if fat_pct < FAT_MODERATE_PCT {
        (FactorStatus::Moderate, 70, FactorMessage::FatModerate { fat_pct: rounded })
    } else {
        (FactorStatus::Poor, 40, FactorMessage::FatHigh { fat_pct: rounded })
    };

    FactorEvaluation {
        name: Factor::Fat,
        status,
        message,
        score,
    }
}

/// Macro split against ideal bands
#[must_use]
pub fn evaluate_balance(macros: &MealMacros) -> FactorEvaluation {
    let bands_hit = [
        PROTEIN_BAND_PCT.contains(&macros.protein_pct),
        CARBS_BAND_PCT.contains(&macros.carbs_pct),
        FAT_BAND_PCT.contains(&macros.fat_pct),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count();

    let (status, score) = match bands_hit {
        3 => (FactorStatus::Good, 100),
        2 => (FactorStatus::Moderate, 70),
        _ => (FactorStatus::Poor, 40),
    };

    FactorEvaluation {
        name: Factor::Balance,
        status,
        message: FactorMessage::MacroBalance {
            bands_hit: u8::try_from(bands_hit).unwrap_or(u8::MAX),
            protein_pct: round_u32(macros.protein_pct),
            carbs_pct: round_u32(macros.carbs_pct),
            fat_pct: round_u32(macros.fat_pct),
        },
        score,
    }
}

/// Worst Nutri-Grade on the plate
#[must_use]
pub fn evaluate_nutri_grade(worst: Option<NutriGrade>) -> FactorEvaluation {
    let (status, score, message) = match worst {
        None => (FactorStatus::Good, 100, FactorMessage::NutriGradeUnavailable),
        Some(grade) => {
            let (status, score) = match grade {
                NutriGrade::A | NutriGrade::B => (FactorStatus::Good, 100),
                NutriGrade::C => (FactorStatus::Moderate, 60),
                NutriGrade::D => (FactorStatus::Poor, 30),
            };
            (
                status,
                score,
                FactorMessage::NutriGradeWorst {
                    grade: grade.as_str().to_owned(),
                },
            )
        }
    };

    FactorEvaluation {
        name: Factor::NutriGrade,
        status,
        message,
        score,
    }
}

/// Presence of high-GI items
#[must_use]
pub fn evaluate_gi(result: &RecognitionResult) -> FactorEvaluation {
    let high_gi_items = result
        .foods()
        .iter()
        .filter(|food| food.gi_level == Some(GiLevel::High))
        .count();

    if high_gi_items == 0 {
        FactorEvaluation {
            name: Factor::GiLevel,
            status: FactorStatus::Good,
            message: FactorMessage::GiLow,
            score: 100,
        }
    } else {
        FactorEvaluation {
            name: Factor::GiLevel,
            status: FactorStatus::Poor,
            message: FactorMessage::GiHigh {
                high_gi_items: u32::try_from(high_gi_items).unwrap_or(u32::MAX),
            },
            score: 40,
        }
    }
}

/// Round a non-negative measurement for display
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_u32(value: f64) -> u32 {
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
