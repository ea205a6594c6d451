// ABOUTME: Nutrition intelligence for HawkerLens: daily targets and meal health ratings
// ABOUTME: Extracted from main crate for parallel compilation and modularity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # HawkerLens Intelligence
//!
//! Pure, deterministic algorithms with no I/O:
//!
//! - **`daily_targets`**: Mifflin-St Jeor based daily calorie and macro budget
//! - **rating**: six-factor weighted meal score, traffic-light tier, and suggestions
//! - **config**: calculator coefficients and rating parameters with validated defaults

/// Calculator and rating configuration
pub mod config;
/// Daily calorie and macro target calculator
pub mod daily_targets;
/// Profile and configuration errors
pub mod error;
/// Multi-factor meal rating engine
pub mod rating;

pub use config::{RatingConfig, TargetCalculatorConfig};
pub use daily_targets::DailyTargetCalculator;
pub use error::{ConfigError, ProfileError};
pub use rating::RatingEngine;
