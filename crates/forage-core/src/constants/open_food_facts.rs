// ABOUTME: Open Food Facts constants
// ABOUTME: Base URL, endpoint paths, language filter, and record fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// Open Food Facts base URL
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Product-by-barcode path prefix (`{prefix}/{barcode}.json`)
pub const PRODUCT_PATH: &str = "/api/v0/product";

/// Text search path
pub const SEARCH_PATH: &str = "/cgi/search.pl";

/// Default number of products per search page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Language tag search results are restricted to
pub const LANGUAGE_TAG: &str = "en";

/// User agent sent upstream, as requested by Open Food Facts
pub const DEFAULT_USER_AGENT: &str = concat!("forage/", env!("CARGO_PKG_VERSION"));

/// Brand used for records without a brand
pub const DEFAULT_BRAND: &str = "Open Food Facts";

/// Name used for records without a product name
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Upstream `status` value for a found product
pub const STATUS_FOUND: i64 = 1;
