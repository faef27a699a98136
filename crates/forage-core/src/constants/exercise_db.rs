// ABOUTME: ExerciseDB constants
// ABOUTME: Base URL, list limits, and exercise defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// `ExerciseDB` API base URL
pub const DEFAULT_BASE_URL: &str = "https://exercisedb-api.vercel.app/api/v1";

/// Number of exercises requested for the cached listing
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Header carrying the optional API key
pub const API_KEY_HEADER: &str = "x-rapidapi-key";

/// Equipment assumed when upstream lists none
pub const DEFAULT_EQUIPMENT: &str = "bodyweight";

/// Slug used when an exercise name contains no alphanumeric characters
pub const FALLBACK_SLUG: &str = "exercise";

/// Path of the form analysis page, completed with the exercise slug
pub const FORM_ANALYSIS_PATH: &str = "/form-analysis";
