// ABOUTME: Health rating output types: factors, tiers, messages, and suggestion keys
// ABOUTME: Language-agnostic keys are resolved to display text at the presentation boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Scored dimension of a meal's healthiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Calories against the meal's share of the daily target
    Calories,
    /// Absolute sodium
    Sodium,
    /// Share of calories from fat
    Fat,
    /// Macro split against ideal bands
    Balance,
    /// Worst Nutri-Grade on the plate
    NutriGrade,
    /// Presence of high-GI items
    GiLevel,
}

impl Factor {
    /// Every factor in evaluation order
    pub const ALL: [Self; 6] = [
        Self::Calories,
        Self::Sodium,
        Self::Fat,
        Self::Balance,
        Self::NutriGrade,
        Self::GiLevel,
    ];

    /// Snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Sodium => "sodium",
            Self::Fat => "fat",
            Self::Balance => "balance",
            Self::NutriGrade => "nutri_grade",
            Self::GiLevel => "gi_level",
        }
    }
}

/// Per-factor verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    /// Within healthy bounds
    Good,
    /// Borderline
    Moderate,
    /// Outside healthy bounds
    Poor,
}

impl FactorStatus {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

/// Overall traffic-light tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    /// Score 80 and above
    Green,
    /// Score 60-79
    Yellow,
    /// Score below 60
    Red,
}

impl RatingTier {
    /// Minimum score for green
    pub const GREEN_MIN_SCORE: u8 = 80;
    /// Minimum score for yellow
    pub const YELLOW_MIN_SCORE: u8 = 60;

    /// Tier for a 0-100 score
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= Self::GREEN_MIN_SCORE {
            Self::Green
        } else if score >= Self::YELLOW_MIN_SCORE {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Diagnostic attached to a factor evaluation, rendered by the localization layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", rename_all = "snake_case")]
pub enum FactorMessage {
    /// Meal calories within 10% of the expected share
    CaloriesOnTarget {
        /// Meal calories (kcal, rounded)
        meal_kcal: u32,
        /// Expected calories for this meal slot (kcal, rounded)
        expected_kcal: u32,
    },
    /// Meal calories above the expected share
    CaloriesAboveTarget {
        /// Meal calories (kcal, rounded)
        meal_kcal: u32,
        /// Expected calories for this meal slot (kcal, rounded)
        expected_kcal: u32,
        /// Deviation in percentage points (rounded)
        deviation_pct: u32,
    },
    /// Meal calories below the expected share
    CaloriesBelowTarget {
        /// Meal calories (kcal, rounded)
        meal_kcal: u32,
        /// Expected calories for this meal slot (kcal, rounded)
        expected_kcal: u32,
        /// Deviation in percentage points (rounded)
        deviation_pct: u32,
    },
    /// Sodium under 700 mg
    SodiumLow {
        /// Meal sodium (mg, rounded)
        sodium_mg: u32,
    },
    /// Sodium 700-999 mg
    SodiumModerate {
        /// Meal sodium (mg, rounded)
        sodium_mg: u32,
    },
    /// Sodium 1000 mg and above
    SodiumHigh {
        /// Meal sodium (mg, rounded)
        sodium_mg: u32,
    },
    /// Fat supplies under 25% of calories
    FatLow {
        /// Fat share of calories (%, rounded)
        fat_pct: u32,
    },
    /// Fat supplies 25-34% of calories
    FatModerate {
        /// Fat share of calories (%, rounded)
        fat_pct: u32,
    },
    /// Fat supplies 35% of calories or more
    FatHigh {
        /// Fat share of calories (%, rounded)
        fat_pct: u32,
    },
    /// Macro split against the ideal bands
    MacroBalance {
        /// Number of macros inside their band (0-3)
        bands_hit: u8,
        /// Protein share of calories (%, rounded)
        protein_pct: u32,
        /// Carbohydrate share of calories (%, rounded)
        carbs_pct: u32,
        /// Fat share of calories (%, rounded)
        fat_pct: u32,
    },
    /// Worst Nutri-Grade on the plate
    NutriGradeWorst {
        /// Grade letter
        grade: String,
    },
    /// No item carried a Nutri-Grade
    NutriGradeUnavailable,
    /// No high-GI items
    GiLow,
    /// At least one high-GI item
    GiHigh {
        /// Number of high-GI items
        high_gi_items: u32,
    },
}

impl FactorMessage {
    /// Localization key
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::CaloriesOnTarget { .. } => "factor.calories_on_target",
            Self::CaloriesAboveTarget { .. } => "factor.calories_above_target",
            Self::CaloriesBelowTarget { .. } => "factor.calories_below_target",
            Self::SodiumLow { .. } => "factor.sodium_low",
            Self::SodiumModerate { .. } => "factor.sodium_moderate",
            Self::SodiumHigh { .. } => "factor.sodium_high",
            Self::FatLow { .. } => "factor.fat_low",
            Self::FatModerate { .. } => "factor.fat_moderate",
            Self::FatHigh { .. } => "factor.fat_high",
            Self::MacroBalance { .. } => "factor.macro_balance",
            Self::NutriGradeWorst { .. } => "factor.nutri_grade_worst",
            Self::NutriGradeUnavailable => "factor.nutri_grade_unavailable",
            Self::GiLow => "factor.gi_low",
            Self::GiHigh { .. } => "factor.gi_high",
        }
    }
}

/// Result of one factor evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorEvaluation {
    /// Which factor
    pub name: Factor,
    /// Verdict
    pub status: FactorStatus,
    /// Diagnostic detail
    pub message: FactorMessage,
    /// 0-100 factor score
    pub score: u8,
}

/// Rule-driven coaching suggestion, resolved to text by the localization layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKey {
    /// Eat a smaller portion
    ReducePortion,
    /// Eat a bigger portion or add a side
    IncreasePortion,
    /// Go easier on sauces and soup
    ReduceSodium,
    /// Sodium is very high, skip the gravy and soup
    CutSodiumSharply,
    /// Prefer steamed, grilled, or soup-based over fried
    ChooseLeanerCooking,
    /// Add a lean protein source
    AddLeanProtein,
    /// Cut back on rice, noodles, or bread
    ReduceRefinedCarbs,
    /// Add vegetables to round out the plate
    AddVegetables,
    /// Choose a lower-sugar drink
    ChooseLowerSugar,
    /// Swap the sugary drink or dessert for a Nutri-Grade A/B option
    AvoidHighSugarItems,
    /// Pair high-GI food with fiber or protein
    PairHighGiWithFiber,
    /// Swap to a low-GI staple such as brown rice
    SwapToLowGiStaple,
    /// Ask the stall for less gravy or sauce
    HawkerLessGravy,
    /// Ask the stall for less oil, or pick a non-fried option
    HawkerLessOil,
    /// Everything looks good
    KeepItUp,
}

impl SuggestionKey {
    /// Concept shared by severity variants, used for de-duplication
    #[must_use]
    pub const fn concept(self) -> &'static str {
        match self {
            Self::ReducePortion | Self::IncreasePortion => "portion",
            Self::ReduceSodium | Self::CutSodiumSharply => "sodium",
            Self::ChooseLeanerCooking => "fat",
            Self::AddLeanProtein => "protein",
            Self::ReduceRefinedCarbs => "carbs",
            Self::AddVegetables => "balance",
            Self::ChooseLowerSugar | Self::AvoidHighSugarItems => "sugar",
            Self::PairHighGiWithFiber | Self::SwapToLowGiStaple => "glycemic",
            Self::HawkerLessGravy => "hawker_gravy",
            Self::HawkerLessOil => "hawker_oil",
            Self::KeepItUp => "keep_it_up",
        }
    }

    /// Localization key
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::ReducePortion => "suggestion.reduce_portion",
            Self::IncreasePortion => "suggestion.increase_portion",
            Self::ReduceSodium => "suggestion.reduce_sodium",
            Self::CutSodiumSharply => "suggestion.cut_sodium_sharply",
            Self::ChooseLeanerCooking => "suggestion.choose_leaner_cooking",
            Self::AddLeanProtein => "suggestion.add_lean_protein",
            Self::ReduceRefinedCarbs => "suggestion.reduce_refined_carbs",
            Self::AddVegetables => "suggestion.add_vegetables",
            Self::ChooseLowerSugar => "suggestion.choose_lower_sugar",
            Self::AvoidHighSugarItems => "suggestion.avoid_high_sugar_items",
            Self::PairHighGiWithFiber => "suggestion.pair_high_gi_with_fiber",
            Self::SwapToLowGiStaple => "suggestion.swap_to_low_gi_staple",
            Self::HawkerLessGravy => "suggestion.hawker_less_gravy",
            Self::HawkerLessOil => "suggestion.hawker_less_oil",
            Self::KeepItUp => "suggestion.keep_it_up",
        }
    }
}

/// One coaching suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    /// Rule-driven suggestion
    Rule {
        /// Suggestion key
        key: SuggestionKey,
    },
    /// Model-supplied tip for a specific dish
    FoodTip {
        /// Dish name
        food: String,
        /// Tip text as supplied by the model
        tip: String,
    },
}

impl Suggestion {
    /// Rule-driven suggestion for `key`
    #[must_use]
    pub const fn rule(key: SuggestionKey) -> Self {
        Self::Rule { key }
    }

    /// Stable de-duplication key, independent of rendered wording
    #[must_use]
    pub fn dedup_key(&self) -> Cow<'static, str> {
        match self {
            Self::Rule { key } => Cow::Borrowed(key.concept()),
            Self::FoodTip { food, .. } => Cow::Owned(format!("tip:{}", food.trim().to_lowercase())),
        }
    }
}

/// Personalized rating for one meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRating {
    /// Traffic-light tier derived from `score`
    pub overall: RatingTier,
    /// Weighted score, 0-100
    pub score: u8,
    /// Per-factor diagnostics in evaluation order
    pub factors: Vec<FactorEvaluation>,
    /// At most four de-duplicated suggestions
    pub suggestions: Vec<Suggestion>,
}

impl HealthRating {
    /// Evaluation for a given factor
    #[must_use]
    pub fn factor(&self, factor: Factor) -> Option<&FactorEvaluation> {
        self.factors.iter().find(|evaluation| evaluation.name == factor)
    }
}
