// ABOUTME: Core types and constants for the HawkerLens meal rating pipeline
// ABOUTME: Foundation crate with nutrition models, validation errors, and cache constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # HawkerLens Core
//!
//! Foundation crate providing the shared types of the meal recognition and
//! rating pipeline. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Validation error taxonomy for AI-returned nutrition payloads
//! - **constants**: Cache TTLs, key prefixes, and other domain constants
//! - **models**: Nutrition ranges, recognition results, health profiles, and ratings

/// Validation error taxonomy for untrusted recognition payloads
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (nutrition, recognition, profile, rating)
pub mod models;
