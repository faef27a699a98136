// ABOUTME: USDA FoodData Central constants
// ABOUTME: Base URL, fallback API key, default data types, and page sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// USDA `FoodData` Central API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Public demo key with strict rate limits, used when no key is configured
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Non-branded data types searched by default
pub const DEFAULT_DATA_TYPES: [&str; 3] = ["Foundation", "SR Legacy", "Survey (FNDDS)"];

/// Canonical page size for food searches, shared by the client and the proxy
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Largest page size accepted by the USDA search API
pub const MAX_PAGE_SIZE: u32 = 200;

/// Brand used for records without a brand owner
pub const DEFAULT_BRAND: &str = "USDA";

/// Name used for records without a description
pub const UNKNOWN_FOOD_NAME: &str = "Unknown Food";

/// Prefix of canonical USDA ids
pub const ID_PREFIX: &str = "usda_";

/// Query used by the connection probe
pub const PROBE_QUERY: &str = "apple";
