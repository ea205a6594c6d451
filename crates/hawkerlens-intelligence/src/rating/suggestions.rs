// ABOUTME: Rule-driven suggestion generation from factor verdicts
// ABOUTME: Poor before moderate, then hawker tips and model item tips; deduplicated and capped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::factors::MealMacros;
use hawkerlens_core::models::{
    Factor, FactorEvaluation, FactorMessage, FactorStatus, HealthGoal, NutriGrade,
    RecognitionResult, Suggestion, SuggestionKey,
};
use std::collections::HashSet;

/// Protein share (percent) below which lean protein is suggested
const LOW_PROTEIN_PCT: f64 = 15.0;
/// Carbohydrate share (percent) above which refined carbs are flagged
const HIGH_CARBS_PCT: f64 = 65.0;

/// Inputs shared by every suggestion rule
pub struct SuggestionContext<'a> {
    /// Factor verdicts in evaluation order
    pub factors: &'a [FactorEvaluation],
    /// Meal point estimates
    pub macros: &'a MealMacros,
    /// The validated meal
    pub result: &'a RecognitionResult,
    /// User goal
    pub goal: HealthGoal,
}

/// Build the suggestion list, keeping the first entry per concept, capped at `limit`
#[must_use]
pub fn generate(ctx: &SuggestionContext<'_>, limit: usize) -> Vec<Suggestion> {
    let mut candidates = Vec::new();

    for severity in [FactorStatus::Poor, FactorStatus::Moderate] {
        for evaluation in ctx.factors.iter().filter(|e| e.status == severity) {
            candidates.extend(rules_for(evaluation, ctx).into_iter().map(Suggestion::rule));
        }
    }

    if ctx.result.has_hawker_food() {
        if status_of(ctx.factors, Factor::Sodium).is_some_and(|s| s != FactorStatus::Good) {
            candidates.push(Suggestion::rule(SuggestionKey::HawkerLessGravy));
        }
        if status_of(ctx.factors, Factor::Fat).is_some_and(|s| s != FactorStatus::Good) {
            candidates.push(Suggestion::rule(SuggestionKey::HawkerLessOil));
        }
    }

    candidates.extend(ctx.result.foods().iter().filter_map(|food| {
        food.improvement_tip
            .as_deref()
            .map(str::trim)
            .filter(|tip| !tip.is_empty())
            .map(|tip| Suggestion::FoodTip {
                food: food.name.clone(),
                tip: tip.to_owned(),
            })
    }));

    let mut seen = HashSet::new();
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .filter(|suggestion| seen.insert(suggestion.dedup_key()))
        .take(limit)
        .collect();

    if suggestions.is_empty() {
        suggestions.push(Suggestion::rule(SuggestionKey::KeepItUp));
    }
    suggestions
}

fn status_of(factors: &[FactorEvaluation], factor: Factor) -> Option<FactorStatus> {
    factors.iter().find(|e| e.name == factor).map(|e| e.status)
}

fn rules_for(evaluation: &FactorEvaluation, ctx: &SuggestionContext<'_>) -> Vec<SuggestionKey> {
    let poor = evaluation.status == FactorStatus::Poor;
    match (&evaluation.name, &evaluation.message) {
        // Deviation in the direction of the goal never asks to undo it
        (Factor::Calories, FactorMessage::CaloriesAboveTarget { .. }) => match ctx.goal {
            HealthGoal::GainMuscle => Vec::new(),
            _ => vec![SuggestionKey::ReducePortion],
        },
        (Factor::Calories, FactorMessage::CaloriesBelowTarget { .. }) => match ctx.goal {
            HealthGoal::LoseWeight => vec![SuggestionKey::AddVegetables],
            _ => vec![SuggestionKey::IncreasePortion],
        },
        (Factor::Sodium, _) if poor => vec![SuggestionKey::CutSodiumSharply],
        (Factor::Sodium, _) => vec![SuggestionKey::ReduceSodium],
        (Factor::Fat, _) => vec![SuggestionKey::ChooseLeanerCooking],
        (Factor::Balance, _) => {
            let mut keys = Vec::new();
            if ctx.macros.protein_pct < LOW_PROTEIN_PCT {
                keys.push(SuggestionKey::AddLeanProtein);
            }
            if ctx.macros.carbs_pct > HIGH_CARBS_PCT {
                keys.push(SuggestionKey::ReduceRefinedCarbs);
            }
            if keys.is_empty() {
                keys.push(SuggestionKey::AddVegetables);
            }
            keys
        }
        (Factor::NutriGrade, _) => match ctx.result.worst_nutri_grade() {
            Some(NutriGrade::D) => vec![SuggestionKey::AvoidHighSugarItems],
            _ => vec![SuggestionKey::ChooseLowerSugar],
        },
        (Factor::GiLevel, _) if ctx.goal == HealthGoal::ControlSugar => {
            vec![SuggestionKey::SwapToLowGiStaple]
        }
        (Factor::GiLevel, _) => vec![SuggestionKey::PairHighGiWithFiber],
        (Factor::Calories, _) => Vec::new(),
    }
}
