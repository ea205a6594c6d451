// ABOUTME: Error types for health profile validation and algorithm configuration
// ABOUTME: ProfileError covers out-of-range body metrics, ConfigError covers bad coefficients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Health profile values outside the range the formulas are validated for
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Height must be in (0, 300] cm
    #[error("height must be between 0 and 300 cm, got {0}")]
    InvalidHeight(f64),

    /// Weight must be in (0, 300] kg
    #[error("weight must be between 0 and 300 kg, got {0}")]
    InvalidWeight(f64),

    /// Age must be 10-120 years (Mifflin-St Jeor validated for ages 10+)
    #[error("age must be between 10 and 120 years, got {0}")]
    InvalidAge(u32),

    /// Explicit macro targets must be finite and non-negative
    #[error("{field} target must be a non-negative number, got {value}")]
    InvalidTarget {
        /// Which explicit target
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Weights don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}
