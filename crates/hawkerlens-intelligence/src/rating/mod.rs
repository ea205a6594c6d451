// ABOUTME: Personalized meal rating engine combining six weighted factor scores
// ABOUTME: Produces a 0-100 score, traffic-light tier, per-factor diagnostics, and suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Rating Engine
//!
//! Evaluates a validated [`RecognitionResult`] against a [`DailyTarget`] and
//! the user's [`HealthGoal`]. Factor scores are combined using a goal-keyed
//! weight table and mapped to a tier: `>= 80` green, `>= 60` yellow, else red.

/// Individual factor evaluators
pub mod factors;
/// Suggestion rules
pub mod suggestions;
/// Goal-keyed weight table
pub mod weights;

use crate::config::RatingConfig;
use factors::MealMacros;
use hawkerlens_core::models::{
    DailyTarget, FactorEvaluation, HealthGoal, HealthRating, RatingTier, RecognitionResult,
};
use suggestions::SuggestionContext;
use tracing::debug;
use weights::FactorWeights;

/// Pure, stateless meal rating engine
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    config: RatingConfig,
}

impl RatingEngine {
    /// Create an engine with custom parameters
    #[must_use]
    pub const fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    /// Rate one meal for one user
    #[must_use]
    pub fn evaluate(
        &self,
        result: &RecognitionResult,
        target: &DailyTarget,
        goal: HealthGoal,
    ) -> HealthRating {
        let macros = MealMacros::from_profile(result.total_nutrition());
        let expected_kcal =
            target.calories * self.config.meal_shares.share_for(result.meal_context());

        let factors = vec![
            factors::evaluate_calories(macros.calories, expected_kcal, goal),
            factors::evaluate_sodium(macros.sodium_mg),
            factors::evaluate_fat(macros.fat_pct),
            factors::evaluate_balance(&macros),
            factors::evaluate_nutri_grade(result.worst_nutri_grade()),
            factors::evaluate_gi(result),
        ];

        let score = weighted_score(&factors, &FactorWeights::for_goal(goal));
        let overall = RatingTier::from_score(score);

        let suggestions = suggestions::generate(
            &SuggestionContext {
                factors: &factors,
                macros: &macros,
                result,
                goal,
            },
            self.config.max_suggestions,
        );

        debug!(
            goal = %goal,
            meal_context = result.meal_context().as_str(),
            score,
            tier = overall.as_str(),
            "Meal rated"
        );

        HealthRating {
            overall,
            score,
            factors,
            suggestions,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn weighted_score(factors: &[FactorEvaluation], weights: &FactorWeights) -> u8 {
    let total: f64 = factors
        .iter()
        .map(|evaluation| f64::from(evaluation.score) * weights.weight(evaluation.name))
        .sum();
    total.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use hawkerlens_core::models::{
        Factor, FactorStatus, FoodItem, GiLevel, MealContext, NutriGrade, NutritionProfile,
        NutritionRange, Suggestion, SuggestionKey,
    };

    fn range(min: f64, max: f64) -> NutritionRange {
        NutritionRange::new(min, max).unwrap()
    }

    /// Ranges in calories, protein, carbs, fat, sodium order
    fn nutrition(bounds: [(f64, f64); 5]) -> NutritionProfile {
        let [calories, protein, carbs, fat, sodium] = bounds.map(|(min, max)| range(min, max));
        NutritionProfile {
            calories,
            protein,
            carbs,
            fat,
            sodium,
        }
    }

    fn food(name: &str, nutrition: NutritionProfile) -> FoodItem {
        FoodItem {
            name: name.to_owned(),
            name_local: name.to_owned(),
            confidence: 90.0,
            portion: "1 plate".to_owned(),
            nutrition,
            nutri_grade: None,
            gi_level: None,
            is_hawker_food: false,
            improvement_tip: None,
        }
    }

    const TARGET: DailyTarget = DailyTarget {
        calories: 2000.0,
        protein: 100.0,
        carbs: 250.0,
        fat: 60.0,
        sodium: 2000.0,
    };

    #[test]
    fn test_balanced_meal_keeps_it_up() {
        let n = nutrition([
            (650.0, 750.0),
            (35.0, 45.0),
            (85.0, 95.0),
            (18.0, 20.0),
            (300.0, 400.0),
        ]);
        let result =
            RecognitionResult::new(vec![food("Sliced fish soup", n)], n, MealContext::Lunch)
                .unwrap();

        let rating = RatingEngine::default().evaluate(&result, &TARGET, HealthGoal::Maintain);
        assert_eq!(rating.score, 100);
        assert_eq!(rating.overall, RatingTier::Green);
        assert_eq!(rating.suggestions, vec![Suggestion::rule(SuggestionKey::KeepItUp)]);
    }

    #[test]
    fn test_suggestions_capped_and_deduplicated() {
        let n = nutrition([
            (1100.0, 1300.0),
            (10.0, 20.0),
            (100.0, 120.0),
            (60.0, 70.0),
            (1800.0, 2200.0),
        ]);
        let mut laksa = food("Laksa", n);
        laksa.is_hawker_food = true;
        laksa.gi_level = Some(GiLevel::High);
        laksa.nutri_grade = Some(NutriGrade::D);
        laksa.improvement_tip = Some("Ask for less coconut gravy".to_owned());
        let result = RecognitionResult::new(vec![laksa], n, MealContext::Dinner).unwrap();

        let rating = RatingEngine::default().evaluate(&result, &TARGET, HealthGoal::Maintain);
        assert_eq!(rating.overall, RatingTier::Red);
        assert_eq!(rating.suggestions.len(), 4);

        let mut keys: Vec<_> = rating.suggestions.iter().map(Suggestion::dedup_key).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
        assert_eq!(rating.suggestions[0], Suggestion::rule(SuggestionKey::ReducePortion));
    }

    #[test]
    fn test_factor_order_is_stable() {
        let n = nutrition([
            (500.0, 600.0),
            (30.0, 35.0),
            (60.0, 70.0),
            (15.0, 20.0),
            (600.0, 800.0),
        ]);
        let result =
            RecognitionResult::new(vec![food("Chicken rice", n)], n, MealContext::Lunch)
                .unwrap();
        let target = DailyTarget {
            calories: 1861.5625,
            ..TARGET
        };
        let rating = RatingEngine::default().evaluate(&result, &target, HealthGoal::LoseWeight);
        let names: Vec<Factor> = rating.factors.iter().map(|f| f.name).collect();
        assert_eq!(names, Factor::ALL.to_vec());
        assert!(rating
            .factors
            .iter()
            .all(|f| f.status != FactorStatus::Poor));
    }
}
