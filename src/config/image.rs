// ABOUTME: Image normalization configuration
// ABOUTME: Bounding box, canonical JPEG quality, and input size limit for meal photos
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::env;

/// Default bounding box edge in pixels
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;
/// Default JPEG quality for the canonical encoding
pub const DEFAULT_JPEG_QUALITY: u8 = 85;
/// Default input size limit (10 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;
/// Default ceiling on decoded width and height
pub const DEFAULT_MAX_DECODE_DIMENSION: u32 = 8192;

/// Image normalizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Longest allowed edge after normalization; smaller images are left as is
    pub max_dimension: u32,
    /// JPEG quality 1..=100
    pub jpeg_quality: u8,
    /// Inputs larger than this are rejected before decoding
    pub max_input_bytes: usize,
    /// Inputs whose header declares a wider or taller image are rejected without decoding pixels
    pub max_decode_dimension: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_decode_dimension: DEFAULT_MAX_DECODE_DIMENSION,
        }
    }
}

impl ImageConfig {
    /// Load image configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_dimension: env::var("IMAGE_MAX_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_DIMENSION),
            jpeg_quality: env::var("IMAGE_JPEG_QUALITY")
                .ok()
                .and_then(|s| s.parse::<u8>().ok())
                .map_or(DEFAULT_JPEG_QUALITY, |q| q.clamp(1, 100)),
            max_input_bytes: env::var("IMAGE_MAX_INPUT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_INPUT_BYTES),
            max_decode_dimension: env::var("IMAGE_MAX_DECODE_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_DECODE_DIMENSION),
        }
    }
}
