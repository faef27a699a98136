// ABOUTME: Application constants organized by upstream provider and concern
// ABOUTME: Base URLs, default page sizes, cache keys, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// Exercise list cache constants
pub mod cache;

/// `ExerciseDB` endpoints and defaults
pub mod exercise_db;

/// Open Food Facts endpoints and defaults
pub mod open_food_facts;

/// USDA `FoodData` Central endpoints and defaults
pub mod usda;

/// Service names used in logs and error messages
pub mod service_names {
    /// Gateway server name
    pub const FORAGE_SERVER: &str = "forage-server";
    /// USDA provider label
    pub const USDA: &str = "USDA";
    /// Open Food Facts provider label
    pub const OPEN_FOOD_FACTS: &str = "Open Food Facts";
    /// `ExerciseDB` provider label
    pub const EXERCISE_DB: &str = "ExerciseDB";
}

/// Shared proxy messages
pub mod messages {
    /// Search endpoints called without `query`
    pub const QUERY_REQUIRED: &str = "Query parameter is required";
    /// Barcode endpoint called without a barcode
    pub const BARCODE_REQUIRED: &str = "Barcode parameter is required";
    /// Barcode is not all digits
    pub const INVALID_BARCODE: &str = "Invalid barcode format";
}
