// ABOUTME: Recognition boundary: recognizer trait, payload validation, and failure taxonomy
// ABOUTME: Turns untrusted recognizer JSON into a validated RecognitionResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Meal analysis failures
pub mod error;
/// External recognizer trait and request type
pub mod recognizer;
/// Payload validation and enrichment
pub mod validator;

pub use error::RecognitionError;
pub use recognizer::{FoodRecognizer, RecognitionRequest};
pub use validator::RecognitionValidator;
