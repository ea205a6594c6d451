// ABOUTME: Integration tests for recognizer payload validation and enrichment
// ABOUTME: Exercises rule ordering, error paths, and lenient optional-field parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveTime;
use hawkerlens::recognition::RecognitionValidator;
use hawkerlens_core::errors::ValidationError;
use hawkerlens_core::models::{GiLevel, MealContext, NutriGrade};
use serde_json::json;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn test_well_formed_payload_accepted() {
    let result = RecognitionValidator::validate(&common::chicken_rice_payload(), at(12, 0)).unwrap();

    assert_eq!(result.foods().len(), 1);
    let item = &result.foods()[0];
    assert_eq!(item.name, "Hainanese Chicken Rice");
    assert_eq!(item.name_local, "海南鸡饭");
    assert_eq!(item.portion, "1 plate");
    assert_eq!(item.gi_level, Some(GiLevel::High));
    assert!(item.is_hawker_food);
    assert_eq!(item.improvement_tip.as_deref(), Some("Ask for less rice"));
    assert_eq!(result.meal_context(), MealContext::Lunch);
    assert!((result.total_nutrition().sodium.max() - 1300.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_or_empty_foods_is_no_food_detected() {
    for raw in [
        json!({}),
        json!({ "foods": [] }),
        json!({ "foods": "rice" }),
        json!({ "foods": [], "totalNutrition": common::chicken_rice_nutrition() }),
    ] {
        assert_eq!(
            RecognitionValidator::validate(&raw, at(12, 0)),
            Err(ValidationError::NoFoodDetected)
        );
    }
}

#[test]
fn test_inverted_calorie_range_rejected() {
    let mut payload = common::chicken_rice_payload();
    payload["foods"][0]["nutrition"]["calories"] = common::range(600.0, 500.0);

    assert_eq!(
        RecognitionValidator::validate(&payload, at(12, 0)),
        Err(ValidationError::InvalidNutritionRange {
            field: "foods[0].nutrition.calories".to_owned(),
            min: 600.0,
            max: 500.0,
        })
    );
}

#[test]
fn test_negative_and_degenerate_ranges_rejected() {
    let mut negative = common::chicken_rice_payload();
    negative["foods"][0]["nutrition"]["protein"] = common::range(-1.0, 5.0);
    assert!(matches!(
        RecognitionValidator::validate(&negative, at(12, 0)),
        Err(ValidationError::InvalidNutritionRange { ref field, .. }) if field == "foods[0].nutrition.protein"
    ));

    let mut flat = common::chicken_rice_payload();
    flat["totalNutrition"]["fat"] = common::range(20.0, 20.0);
    assert!(matches!(
        RecognitionValidator::validate(&flat, at(12, 0)),
        Err(ValidationError::InvalidNutritionRange { ref field, .. }) if field == "totalNutrition.fat"
    ));
}

#[test]
fn test_missing_nutrient_reports_path() {
    let mut payload = common::chicken_rice_payload();
    payload["foods"][0]["nutrition"]
        .as_object_mut()
        .unwrap()
        .remove("sodium");

    assert_eq!(
        RecognitionValidator::validate(&payload, at(12, 0)),
        Err(ValidationError::IncompleteFoodInformation {
            item: Some(0),
            field: "foods[0].nutrition.sodium".to_owned(),
        })
    );
}

#[test]
fn test_non_numeric_bound_is_incomplete() {
    let mut payload = common::chicken_rice_payload();
    payload["foods"][0]["nutrition"]["carbs"]["max"] = json!("lots");

    assert_eq!(
        RecognitionValidator::validate(&payload, at(12, 0)),
        Err(ValidationError::IncompleteFoodInformation {
            item: Some(0),
            field: "foods[0].nutrition.carbs.max".to_owned(),
        })
    );
}

#[test]
fn test_blank_name_is_incomplete() {
    let mut payload = common::chicken_rice_payload();
    payload["foods"][0]["name"] = json!("   ");

    assert!(matches!(
        RecognitionValidator::validate(&payload, at(12, 0)),
        Err(ValidationError::IncompleteFoodInformation { item: Some(0), ref field }) if field == "foods[0].name"
    ));
}

#[test]
fn test_enrichment_backfills_local_name_and_meal_context() {
    let mut payload = common::chicken_rice_payload();
    let item = payload["foods"][0].as_object_mut().unwrap();
    item.remove("nameLocal");
    item.remove("confidence");
    item.remove("portion");
    payload.as_object_mut().unwrap().remove("mealContext");

    let result = RecognitionValidator::validate(&payload, at(19, 30)).unwrap();
    let item = &result.foods()[0];

    assert_eq!(item.name_local, item.name);
    assert!(item.confidence.abs() < f64::EPSILON);
    assert_eq!(item.portion, "1 serving");
    assert_eq!(result.meal_context(), MealContext::Dinner);
}

#[test]
fn test_unknown_meal_context_falls_back_to_time() {
    let mut payload = common::chicken_rice_payload();
    payload["mealContext"] = json!("brunch");

    let result = RecognitionValidator::validate(&payload, at(8, 0)).unwrap();
    assert_eq!(result.meal_context(), MealContext::Breakfast);
}

#[test]
fn test_low_confidence_items_pass_validation() {
    let result =
        RecognitionValidator::validate(&common::uncertain_drink_payload(), at(8, 15)).unwrap();

    let uncertain: Vec<&str> = result
        .low_confidence_items(60.0)
        .map(|food| food.name.as_str())
        .collect();
    assert_eq!(uncertain, vec!["Kopi"]);
    assert_eq!(result.worst_nutri_grade(), Some(NutriGrade::C));
    assert!(result.has_hawker_food());
}
