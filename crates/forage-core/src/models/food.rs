// ABOUTME: Canonical nutrition record independent of the upstream provider
// ABOUTME: CanonicalFood and FoodSource definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream source of a food record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    /// USDA `FoodData` Central
    Usda,
    /// Open Food Facts
    #[serde(rename = "openfoodfacts")]
    OpenFoodFacts,
}

impl fmt::Display for FoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usda => f.write_str("usda"),
            Self::OpenFoodFacts => f.write_str("openfoodfacts"),
        }
    }
}

/// One normalized nutrition record
///
/// Nutrient fields are always present. A missing upstream nutrient is stored
/// as zero, which is not the same thing as a measured zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalFood {
    /// Source-prefixed identifier (`usda_<fdcId>` or the product barcode)
    pub id: String,
    /// Display name
    pub name: String,
    /// Brand, defaulting to the source name
    pub brand: String,
    /// Upstream source
    pub source: FoodSource,
    /// Serving label (e.g. "100g", "1 cup (240 ml)")
    pub serving_size: String,
    /// Gram equivalent of one serving
    pub serving_grams: f64,
    /// Energy in kcal
    pub calories: u32,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Total fat in grams
    pub fat: f64,
    /// Fiber in grams
    pub fiber: f64,
    /// Total sugars in grams
    pub sugar: f64,
    /// Saturated fat in grams
    pub saturated_fat: f64,
    /// Sodium in milligrams
    pub sodium: u32,
    /// Cholesterol in milligrams
    pub cholesterol: u32,
    /// Ingredient list, when upstream provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    /// Upstream food category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Upstream publication date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
}
