// ABOUTME: Failure taxonomy of one meal analysis request
// ABOUTME: Each variant resolves to a stable localized message key and a retry hint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use hawkerlens_core::errors::ValidationError;
use hawkerlens_intelligence::ProfileError;
use thiserror::Error;

/// Why a meal could not be analyzed
///
/// Cache failures never appear here; they degrade to a miss inside the cache.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The photo is not a decodable JPEG, PNG or WebP
    #[error("unsupported image format: {reason}")]
    UnsupportedFormat {
        /// Decoder detail, for logs only
        reason: String,
    },

    /// The photo exceeds the configured input size
    #[error("image too large: {bytes} bytes exceeds limit of {limit}")]
    ImageTooLarge {
        /// Received size
        bytes: usize,
        /// Configured limit
        limit: usize,
    },

    /// A text description was submitted but is blank
    #[error("meal description is empty")]
    EmptyDescription,

    /// The recognizer answered with an unusable payload
    #[error("recognition result rejected: {0}")]
    Validation(#[from] ValidationError),

    /// The recognizer did not answer before the deadline
    #[error("recognizer timed out after {secs}s")]
    Timeout {
        /// Deadline that elapsed
        secs: u64,
    },

    /// The recognizer call itself failed
    #[error("recognizer failed: {0}")]
    Recognizer(#[source] AppError),

    /// The health profile cannot produce a daily target
    #[error("invalid health profile: {0}")]
    Profile(#[from] ProfileError),
}

impl RecognitionError {
    /// Stable key used to resolve a localized user-facing message
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "error.unsupported_format",
            Self::ImageTooLarge { .. } => "error.image_too_large",
            Self::EmptyDescription => "error.empty_description",
            Self::Validation(inner) => inner.message_key(),
            Self::Timeout { .. } => "error.timeout",
            Self::Recognizer(_) => "error.recognizer_unavailable",
            Self::Profile(_) => "error.invalid_profile",
        }
    }

    /// Whether the user can simply try the same request again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Recognizer(_))
    }
}

impl From<AppError> for RecognitionError {
    fn from(error: AppError) -> Self {
        Self::Recognizer(error)
    }
}
