// ABOUTME: Tests for presentation-boundary localization in English and Simplified Chinese
// ABOUTME: Every key the core can emit must resolve to real text in both locales
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use hawkerlens::errors::AppError;
use hawkerlens::i18n::{
    localize_error, localize_factor_message, localize_rating, localize_suggestion,
    localize_suggestion_key, localize_warning, Language,
};
use hawkerlens::pipeline::RecognitionWarning;
use hawkerlens::recognition::RecognitionError;
use hawkerlens_core::errors::ValidationError;
use hawkerlens_core::models::{
    Factor, FactorEvaluation, FactorMessage, FactorStatus, HealthRating, RatingTier, Suggestion,
    SuggestionKey,
};

const LANGUAGES: [Language; 2] = [Language::En, Language::ZhCn];

const SUGGESTION_KEYS: [SuggestionKey; 15] = [
    SuggestionKey::ReducePortion,
    SuggestionKey::IncreasePortion,
    SuggestionKey::ReduceSodium,
    SuggestionKey::CutSodiumSharply,
    SuggestionKey::ChooseLeanerCooking,
    SuggestionKey::AddLeanProtein,
    SuggestionKey::ReduceRefinedCarbs,
    SuggestionKey::AddVegetables,
    SuggestionKey::ChooseLowerSugar,
    SuggestionKey::AvoidHighSugarItems,
    SuggestionKey::PairHighGiWithFiber,
    SuggestionKey::SwapToLowGiStaple,
    SuggestionKey::HawkerLessGravy,
    SuggestionKey::HawkerLessOil,
    SuggestionKey::KeepItUp,
];

/// rust-i18n echoes the key back when a translation is missing
fn assert_resolved(text: &str, key: &str) {
    assert!(!text.is_empty(), "{key} resolved to empty text");
    assert_ne!(text, key, "{key} is missing a translation");
    assert!(!text.contains("%{"), "{key} left a placeholder: {text}");
}

#[test]
fn test_every_suggestion_key_resolves() {
    for language in LANGUAGES {
        for key in SUGGESTION_KEYS {
            let text = localize_suggestion_key(key, language);
            assert_resolved(&text, key.message_key());
        }
    }
}

#[test]
fn test_languages_differ() {
    let english = localize_suggestion_key(SuggestionKey::KeepItUp, Language::En);
    let chinese = localize_suggestion_key(SuggestionKey::KeepItUp, Language::ZhCn);
    assert_ne!(english, chinese);
}

#[test]
fn test_factor_messages_interpolate_values() {
    let messages = [
        FactorMessage::CaloriesOnTarget {
            meal_kcal: 700,
            expected_kcal: 710,
        },
        FactorMessage::CaloriesAboveTarget {
            meal_kcal: 1200,
            expected_kcal: 600,
            deviation_pct: 100,
        },
        FactorMessage::CaloriesBelowTarget {
            meal_kcal: 300,
            expected_kcal: 600,
            deviation_pct: 50,
        },
        FactorMessage::SodiumLow { sodium_mg: 350 },
        FactorMessage::SodiumModerate { sodium_mg: 850 },
        FactorMessage::SodiumHigh { sodium_mg: 1650 },
        FactorMessage::FatLow { fat_pct: 18 },
        FactorMessage::FatModerate { fat_pct: 30 },
        FactorMessage::FatHigh { fat_pct: 48 },
        FactorMessage::MacroBalance {
            bands_hit: 2,
            protein_pct: 12,
            carbs_pct: 55,
            fat_pct: 33,
        },
        FactorMessage::NutriGradeWorst {
            grade: "D".to_owned(),
        },
        FactorMessage::NutriGradeUnavailable,
        FactorMessage::GiLow,
        FactorMessage::GiHigh { high_gi_items: 2 },
    ];

    for language in LANGUAGES {
        for message in &messages {
            let text = localize_factor_message(message, language);
            assert_resolved(&text, message.message_key());
        }
    }

    let sodium =
        localize_factor_message(&FactorMessage::SodiumHigh { sodium_mg: 1650 }, Language::En);
    assert!(sodium.contains("1650"));
}

#[test]
fn test_food_tip_keeps_model_text() {
    let tip = Suggestion::FoodTip {
        food: "Laksa".to_owned(),
        tip: "Leave half the gravy".to_owned(),
    };
    let text = localize_suggestion(&tip, Language::ZhCn);
    assert!(text.contains("Laksa"));
    assert!(text.contains("Leave half the gravy"));
}

#[test]
fn test_every_error_resolves() {
    let errors = [
        RecognitionError::UnsupportedFormat {
            reason: "gif".to_owned(),
        },
        RecognitionError::ImageTooLarge {
            bytes: 20,
            limit: 10,
        },
        RecognitionError::EmptyDescription,
        RecognitionError::Validation(ValidationError::NoFoodDetected),
        RecognitionError::Validation(ValidationError::IncompleteFoodInformation {
            item: Some(0),
            field: "foods[0].name".to_owned(),
        }),
        RecognitionError::Validation(ValidationError::InvalidNutritionRange {
            field: "totalNutrition.fat".to_owned(),
            min: 20.0,
            max: 10.0,
        }),
        RecognitionError::Timeout { secs: 30 },
        RecognitionError::Recognizer(AppError::external_service("vision", "down")),
    ];

    for language in LANGUAGES {
        for error in &errors {
            assert_resolved(&localize_error(error, language), error.message_key());
        }
    }
}

#[test]
fn test_rating_renders_headline_and_factor_lines() {
    let rating = HealthRating {
        overall: RatingTier::Yellow,
        score: 72,
        factors: vec![FactorEvaluation {
            name: Factor::Sodium,
            status: FactorStatus::Moderate,
            message: FactorMessage::SodiumModerate { sodium_mg: 850 },
            score: 60,
        }],
        suggestions: vec![Suggestion::rule(SuggestionKey::ReduceSodium)],
    };

    let english = localize_rating(&rating, Language::En);
    assert_eq!(english.tier, RatingTier::Yellow);
    assert!(english.headline.contains("72"));
    assert_eq!(english.factors[0].name, "Sodium");
    assert_eq!(english.factors[0].status, "Moderate");
    assert!(english.factors[0].detail.contains("850"));
    assert_eq!(english.suggestions.len(), 1);

    let chinese = localize_rating(&rating, Language::ZhCn);
    assert_eq!(chinese.factors[0].name, "钠");
    assert_ne!(chinese.headline, english.headline);
}

#[test]
fn test_warning_rounds_confidence() {
    let warning = RecognitionWarning::LowConfidence {
        food: "Kopi".to_owned(),
        confidence: 44.6,
    };
    let text = localize_warning(&warning, Language::En);
    assert!(text.contains("Kopi"));
    assert!(text.contains("45%"));
}
