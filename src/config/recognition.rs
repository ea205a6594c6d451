// ABOUTME: Recognition pipeline configuration
// ABOUTME: Recognizer deadline, low-confidence warning threshold, and default reply language
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::i18n::Language;
use hawkerlens_core::constants::recognition::DEFAULT_LOW_CONFIDENCE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default hard deadline for the external recognizer
pub const DEFAULT_RECOGNITION_TIMEOUT_SECS: u64 = 30;

/// Recognition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Deadline for one recognizer call in seconds
    pub timeout_secs: u64,
    /// Items below this confidence produce a soft warning
    pub low_confidence_threshold: f64,
    /// Language passed to the recognizer and used for messages
    pub default_language: Language,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_RECOGNITION_TIMEOUT_SECS,
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            default_language: Language::default(),
        }
    }
}

impl RecognitionConfig {
    /// Load recognition configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env::var("RECOGNITION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RECOGNITION_TIMEOUT_SECS),
            low_confidence_threshold: env::var("RECOGNITION_LOW_CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_LOW_CONFIDENCE_THRESHOLD),
            default_language: env::var("DEFAULT_LANGUAGE")
                .ok()
                .and_then(|s| Language::from_code(&s))
                .unwrap_or_default(),
        }
    }

    /// Recognizer deadline as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
