// ABOUTME: Goal-keyed factor weight table for the overall meal score
// ABOUTME: Each goal maps to six weights summing to 1.0, matched exhaustively on HealthGoal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hawkerlens_core::models::{Factor, HealthGoal};
use serde::{Deserialize, Serialize};

/// Relative importance of each factor for one goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    /// Calories weight
    pub calories: f64,
    /// Sodium weight
    pub sodium: f64,
    /// Fat weight
    pub fat: f64,
    /// Macro balance weight
    pub balance: f64,
    /// Nutri-Grade weight
    pub nutri_grade: f64,
    /// Glycemic index weight
    pub gi_level: f64,
}

impl FactorWeights {
    /// Weight profile for a goal
    ///
    /// Lose-weight emphasizes calories, fat, and GI; gain-muscle emphasizes
    /// balance; control-sugar emphasizes Nutri-Grade and GI.
    #[must_use]
    pub const fn for_goal(goal: HealthGoal) -> Self {
        match goal {
            HealthGoal::LoseWeight => Self {
                calories: 0.30,
                sodium: 0.10,
                fat: 0.20,
                balance: 0.10,
                nutri_grade: 0.10,
                gi_level: 0.20,
            },
            HealthGoal::GainMuscle => Self {
                calories: 0.20,
                sodium: 0.10,
                fat: 0.10,
                balance: 0.30,
                nutri_grade: 0.10,
                gi_level: 0.20,
            },
            HealthGoal::ControlSugar => Self {
                calories: 0.15,
                sodium: 0.10,
                fat: 0.10,
                balance: 0.15,
                nutri_grade: 0.25,
                gi_level: 0.25,
            },
            HealthGoal::Maintain => Self {
                calories: 0.20,
                sodium: 0.20,
                fat: 0.15,
                balance: 0.20,
                nutri_grade: 0.10,
                gi_level: 0.15,
            },
        }
    }

    /// Weight for a single factor
    #[must_use]
    pub const fn weight(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Calories => self.calories,
            Factor::Sodium => self.sodium,
            Factor::Fat => self.fat,
            Factor::Balance => self.balance,
            Factor::NutriGrade => self.nutri_grade,
            Factor::GiLevel => self.gi_level,
        }
    }

    /// Sum of all six weights
    #[must_use]
    pub fn total(&self) -> f64 {
        Factor::ALL.iter().map(|factor| self.weight(*factor)).sum()
    }
}
