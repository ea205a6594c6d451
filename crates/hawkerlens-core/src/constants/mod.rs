// ABOUTME: Application constants organized by domain
// ABOUTME: Cache policy values and nutrition reference values shared across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache TTLs, capacity, and key prefixes
pub mod cache;

/// Nutrition reference values
pub mod nutrition {
    /// Energy density of protein (kcal per gram)
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;

    /// Energy density of carbohydrate (kcal per gram)
    pub const KCAL_PER_G_CARBS: f64 = 4.0;

    /// Energy density of fat (kcal per gram)
    pub const KCAL_PER_G_FAT: f64 = 9.0;

    /// WHO daily sodium reference intake (mg)
    pub const WHO_SODIUM_REFERENCE_MG: f64 = 2000.0;

    /// Minimum daily fat target (grams)
    pub const MIN_DAILY_FAT_G: f64 = 30.0;
}

/// Recognition defaults
pub mod recognition {
    /// Items below this confidence produce a soft warning
    pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 60.0;

    /// Portion used when the model omits one
    pub const DEFAULT_PORTION: &str = "1 serving";

    /// Upper bound of the confidence scale
    pub const MAX_CONFIDENCE: f64 = 100.0;
}
