// ABOUTME: Contract validation and enrichment of untrusted recognizer JSON
// ABOUTME: Ordered structural and numeric rules; the first failure wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recognition validator
//!
//! The recognizer returns loosely-typed JSON. Nothing downstream sees it
//! until it passes, in order:
//!
//! 1. `foods` is a non-empty array, else `NoFoodDetected`
//! 2. every item has a non-empty `name` and all five nutrition ranges with
//!    numeric bounds, else `IncompleteFoodInformation`
//! 3. every item range satisfies `0 <= min < max`, else `InvalidNutritionRange`
//! 4. `totalNutrition` is present and passes rules 2 and 3
//!
//! Accepted payloads are enriched: a missing `nameLocal` takes `name` and a
//! missing or unknown `mealContext` is inferred from the meal time. Optional
//! fields are parsed leniently; unknown grades are dropped, confidence is
//! clamped. Low confidence never fails validation.

use chrono::NaiveTime;
use hawkerlens_core::constants::recognition::{DEFAULT_PORTION, MAX_CONFIDENCE};
use hawkerlens_core::errors::ValidationError;
use hawkerlens_core::models::{
    FoodItem, GiLevel, MealContext, NutriGrade, Nutrient, NutritionProfile, NutritionRange,
    RecognitionResult,
};
use serde_json::{Map, Value};

/// Bounds of one range before the numeric check
#[derive(Debug, Clone, Copy)]
struct RawBounds {
    min: f64,
    max: f64,
}

/// Stateless validator for recognizer payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct RecognitionValidator;

impl RecognitionValidator {
    /// Validate and enrich a raw payload
    ///
    /// `meal_time` is the local time of the meal, used only when the payload
    /// carries no recognizable `mealContext`.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` in rule order
    pub fn validate(
        raw: &Value,
        meal_time: NaiveTime,
    ) -> Result<RecognitionResult, ValidationError> {
        let items = raw
            .get("foods")
            .and_then(Value::as_array)
            .filter(|foods| !foods.is_empty())
            .ok_or(ValidationError::NoFoodDetected)?;

        // Rule 2 over every item before any numeric check
        let mut shapes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| incomplete(Some(index), format!("foods[{index}].name")))?;
            let bounds = nutrition_bounds(
                item.get("nutrition"),
                Some(index),
                &format!("foods[{index}].nutrition"),
            )?;
            shapes.push((name, bounds));
        }

        // Rule 3
        let mut profiles = Vec::with_capacity(shapes.len());
        for (index, (_, bounds)) in shapes.iter().enumerate() {
            profiles.push(checked_profile(bounds, &format!("foods[{index}].nutrition"))?);
        }

        // Rule 4
        let total_bounds = nutrition_bounds(raw.get("totalNutrition"), None, "totalNutrition")?;
        let total = checked_profile(&total_bounds, "totalNutrition")?;

        let foods = items
            .iter()
            .zip(shapes)
            .zip(profiles)
            .map(|((item, (name, _)), nutrition)| enrich_item(item, name, nutrition))
            .collect();

        let meal_context = raw
            .get("mealContext")
            .and_then(Value::as_str)
            .and_then(MealContext::from_str_lossy)
            .unwrap_or_else(|| MealContext::from_time(meal_time));

        RecognitionResult::new(foods, total, meal_context)
            .map_err(|_| ValidationError::NoFoodDetected)
    }
}

fn incomplete(item: Option<usize>, field: String) -> ValidationError {
    ValidationError::IncompleteFoodInformation { item, field }
}

fn nutrition_bounds(
    nutrition: Option<&Value>,
    item: Option<usize>,
    path: &str,
) -> Result<[RawBounds; 5], ValidationError> {
    let object: &Map<String, Value> = nutrition
        .and_then(Value::as_object)
        .ok_or_else(|| incomplete(item, path.to_owned()))?;

    let mut bounds = [RawBounds { min: 0.0, max: 0.0 }; 5];
    for (slot, nutrient) in bounds.iter_mut().zip(Nutrient::ALL) {
        let field = format!("{path}.{}", nutrient.field_name());
        let range = object
            .get(nutrient.field_name())
            .and_then(Value::as_object)
            .ok_or_else(|| incomplete(item, field.clone()))?;
        let min = range
            .get("min")
            .and_then(Value::as_f64)
            .ok_or_else(|| incomplete(item, format!("{field}.min")))?;
        let max = range
            .get("max")
            .and_then(Value::as_f64)
            .ok_or_else(|| incomplete(item, format!("{field}.max")))?;
        *slot = RawBounds { min, max };
    }
    Ok(bounds)
}

fn checked_profile(
    bounds: &[RawBounds; 5],
    path: &str,
) -> Result<NutritionProfile, ValidationError> {
    let mut ranges = Vec::with_capacity(bounds.len());
    for (raw, nutrient) in bounds.iter().zip(Nutrient::ALL) {
        let invalid = || ValidationError::InvalidNutritionRange {
            field: format!("{path}.{}", nutrient.field_name()),
            min: raw.min,
            max: raw.max,
        };
        // Degenerate ranges are rejected, not only inverted ones
        let strictly_ordered = raw.min >= 0.0 && raw.min < raw.max;
        if !strictly_ordered {
            return Err(invalid());
        }
        ranges.push(NutritionRange::new(raw.min, raw.max).map_err(|_| invalid())?);
    }

    match ranges.as_slice() {
        [calories, protein, carbs, fat, sodium] => Ok(NutritionProfile {
            calories: *calories,
            protein: *protein,
            carbs: *carbs,
            fat: *fat,
            sodium: *sodium,
        }),
        _ => Err(incomplete(None, path.to_owned())),
    }
}

fn text_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn enrich_item(item: &Value, name: &str, nutrition: NutritionProfile) -> FoodItem {
    let text = |field: &str| text_field(item, field);

    FoodItem {
        name: name.to_owned(),
        name_local: text("nameLocal").unwrap_or(name).to_owned(),
        confidence: item
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| c.is_finite())
            .map_or(0.0, |c| c.clamp(0.0, MAX_CONFIDENCE)),
        portion: text("portion").unwrap_or(DEFAULT_PORTION).to_owned(),
        nutrition,
        nutri_grade: text("nutriGrade").and_then(NutriGrade::from_str_lossy),
        gi_level: text("giLevel").and_then(GiLevel::from_str_lossy),
        is_hawker_food: item
            .get("isHawkerFood")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        improvement_tip: text("improvementTip").map(str::to_owned),
    }
}
