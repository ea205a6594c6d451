// ABOUTME: Presentation-boundary localization of ratings, suggestions, warnings, and errors
// ABOUTME: Resolves language-agnostic keys to English or Simplified Chinese text via rust-i18n
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Localization
//!
//! The scoring core only emits keys ([`SuggestionKey`], [`FactorMessage`],
//! error message keys). Text lives in `locales/*.yml` and is resolved here.

use crate::pipeline::RecognitionWarning;
use crate::recognition::RecognitionError;
use hawkerlens_core::models::{
    Factor, FactorEvaluation, FactorMessage, FactorStatus, HealthRating, RatingTier, Suggestion,
    SuggestionKey,
};
use rust_i18n::t;
use serde::{Deserialize, Serialize};

/// Supported reply languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English
    #[default]
    #[serde(rename = "en")]
    En,
    /// Simplified Chinese
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Language {
    /// Locale code used by the translation files
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh-CN",
        }
    }

    /// Parse a locale code leniently (`en-SG`, `zh`, `zh_cn`, `zh-Hans` ...)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_ascii_lowercase().replace('_', "-");
        let primary = normalized.split('-').next().unwrap_or_default();
        match primary {
            "en" => Some(Self::En),
            "zh" => Some(Self::ZhCn),
            _ => None,
        }
    }
}

/// Display-ready factor line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedFactor {
    /// Which factor
    pub factor: Factor,
    /// Localized factor name
    pub name: String,
    /// Localized verdict
    pub status: String,
    /// Localized diagnostic sentence
    pub detail: String,
    /// Factor score
    pub score: u8,
}

/// Display-ready rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedRating {
    /// Overall tier
    pub tier: RatingTier,
    /// Localized headline for the tier and score
    pub headline: String,
    /// Weighted score
    pub score: u8,
    /// Factor lines in evaluation order
    pub factors: Vec<LocalizedFactor>,
    /// Suggestion sentences
    pub suggestions: Vec<String>,
}

/// Text for one suggestion
#[must_use]
pub fn localize_suggestion(suggestion: &Suggestion, language: Language) -> String {
    let locale = language.code();
    match suggestion {
        Suggestion::Rule { key } => localize_suggestion_key(*key, language),
        Suggestion::FoodTip { food, tip } => t!(
            "suggestion.food_tip",
            locale = locale,
            food = food,
            tip = tip
        )
        .into_owned(),
    }
}

/// Text for a suggestion key
#[must_use]
pub fn localize_suggestion_key(key: SuggestionKey, language: Language) -> String {
    t!(key.message_key(), locale = language.code()).into_owned()
}

/// Diagnostic sentence for a factor message
#[must_use]
pub fn localize_factor_message(message: &FactorMessage, language: Language) -> String {
    let locale = language.code();
    let key = message.message_key();
    let text = match message {
        FactorMessage::CaloriesOnTarget {
            meal_kcal,
            expected_kcal,
        } => t!(
            key,
            locale = locale,
            meal_kcal = meal_kcal,
            expected_kcal = expected_kcal
        ),
        FactorMessage::CaloriesAboveTarget {
            meal_kcal,
            expected_kcal,
            deviation_pct,
        }
        | FactorMessage::CaloriesBelowTarget {
            meal_kcal,
            expected_kcal,
            deviation_pct,
        } => t!(
            key,
            locale = locale,
            meal_kcal = meal_kcal,
            expected_kcal = expected_kcal,
            deviation_pct = deviation_pct
        ),
        FactorMessage::SodiumLow { sodium_mg }
        | FactorMessage::SodiumModerate { sodium_mg }
        | FactorMessage::SodiumHigh { sodium_mg } => {
            t!(key, locale = locale, sodium_mg = sodium_mg)
        }
        FactorMessage::FatLow { fat_pct }
        | FactorMessage::FatModerate { fat_pct }
        | FactorMessage::FatHigh { fat_pct } => t!(key, locale = locale, fat_pct = fat_pct),
        FactorMessage::MacroBalance {
            bands_hit,
            protein_pct,
            carbs_pct,
            fat_pct,
        } => t!(
            key,
            locale = locale,
            bands_hit = bands_hit,
            protein_pct = protein_pct,
            carbs_pct = carbs_pct,
            fat_pct = fat_pct
        ),
        FactorMessage::NutriGradeWorst { grade } => t!(key, locale = locale, grade = grade),
        FactorMessage::GiHigh { high_gi_items } => {
            t!(key, locale = locale, high_gi_items = high_gi_items)
        }
        FactorMessage::NutriGradeUnavailable | FactorMessage::GiLow => t!(key, locale = locale),
    };
    text.into_owned()
}

/// Display line for one factor evaluation
#[must_use]
pub fn localize_factor(evaluation: &FactorEvaluation, language: Language) -> LocalizedFactor {
    let locale = language.code();
    LocalizedFactor {
        factor: evaluation.name,
        name: t!(
            format!("factor_name.{}", evaluation.name.as_str()),
            locale = locale
        )
        .into_owned(),
        status: localize_status(evaluation.status, language),
        detail: localize_factor_message(&evaluation.message, language),
        score: evaluation.score,
    }
}

fn localize_status(status: FactorStatus, language: Language) -> String {
    t!(format!("status.{}", status.as_str()), locale = language.code()).into_owned()
}

/// Render a whole rating for presentation
#[must_use]
pub fn localize_rating(rating: &HealthRating, language: Language) -> LocalizedRating {
    LocalizedRating {
        tier: rating.overall,
        headline: t!(
            format!("tier.{}", rating.overall.as_str()),
            locale = language.code(),
            score = rating.score
        )
        .into_owned(),
        score: rating.score,
        factors: rating
            .factors
            .iter()
            .map(|evaluation| localize_factor(evaluation, language))
            .collect(),
        suggestions: rating
            .suggestions
            .iter()
            .map(|suggestion| localize_suggestion(suggestion, language))
            .collect(),
    }
}

/// Short, actionable message for a failed analysis
#[must_use]
pub fn localize_error(error: &RecognitionError, language: Language) -> String {
    t!(error.message_key(), locale = language.code()).into_owned()
}

/// Soft warning text
#[must_use]
pub fn localize_warning(warning: &RecognitionWarning, language: Language) -> String {
    match warning {
        RecognitionWarning::LowConfidence { food, confidence } => t!(
            "warning.low_confidence",
            locale = language.code(),
            food = food,
            confidence = format!("{confidence:.0}")
        )
        .into_owned(),
    }
}
