// ABOUTME: Open Food Facts wire types and their mapping to CanonicalFood
// ABOUTME: Reads per-100g nutriments and converts sodium and cholesterol from grams to milligrams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{
    lenient, lenient_f64, lenient_or_default, lenient_string, non_empty, round_to_tenth,
    round_to_u32, skip_malformed,
};
use crate::constants::open_food_facts::{DEFAULT_BRAND, STATUS_FOUND, UNKNOWN_PRODUCT_NAME};
use crate::models::{CanonicalFood, FoodSource};
use serde::Deserialize;

const DEFAULT_SERVING_GRAMS: f64 = 100.0;
const MILLIGRAMS_PER_GRAM: f64 = 1000.0;

/// `/api/v0/product/{barcode}.json` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffProductResponse {
    /// 1 when the product exists
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: i64,
    /// Upstream status description
    #[serde(default, deserialize_with = "lenient_string")]
    pub status_verbose: Option<String>,
    /// Requested barcode
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    /// Product record
    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<OffProduct>,
}

impl OffProductResponse {
    /// The product, if upstream reported it as found
    #[must_use]
    pub fn into_found(self) -> Option<OffProduct> {
        if self.status != STATUS_FOUND {
            return None;
        }
        let code = self.code;
        self.product.map(|mut product| {
            if product.code.is_none() {
                product.code = code;
            }
            product
        })
    }
}

/// Upstream status as a number, a numeric string, or 0 when unreadable
fn lenient_status<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient_f64(deserializer).map(|status| status.map_or(0, |s| s as i64))
}

/// `/cgi/search.pl` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffSearchResponse {
    /// Products on this page
    #[serde(default, deserialize_with = "skip_malformed")]
    pub products: Vec<OffProduct>,
}

/// One Open Food Facts product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffProduct {
    /// Barcode
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    /// Product name
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,
    /// English product name
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name_en: Option<String>,
    /// Comma-separated brand list
    #[serde(default, deserialize_with = "lenient_string")]
    pub brands: Option<String>,
    /// Serving label, e.g. "30 g"
    #[serde(default, deserialize_with = "lenient_string")]
    pub serving_size: Option<String>,
    /// Serving weight in grams
    #[serde(default, deserialize_with = "lenient_f64")]
    pub serving_quantity: Option<f64>,
    /// Nutrient table
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub nutriments: OffNutriments,
    /// Ingredient statement
    #[serde(default, deserialize_with = "lenient_string")]
    pub ingredients_text: Option<String>,
    /// Comma-separated category list
    #[serde(default, deserialize_with = "lenient_string")]
    pub categories: Option<String>,
}

/// Per-100g nutriments (grams unless noted)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffNutriments {
    /// Energy in kcal
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64")]
    pub energy_kcal: Option<f64>,
    /// Protein
    #[serde(rename = "proteins_100g", default, deserialize_with = "lenient_f64")]
    pub proteins: Option<f64>,
    /// Carbohydrates
    #[serde(rename = "carbohydrates_100g", default, deserialize_with = "lenient_f64")]
    pub carbohydrates: Option<f64>,
    /// Fat
    #[serde(rename = "fat_100g", default, deserialize_with = "lenient_f64")]
    pub fat: Option<f64>,
    /// Fiber
    #[serde(rename = "fiber_100g", default, deserialize_with = "lenient_f64")]
    pub fiber: Option<f64>,
    /// Sugars
    #[serde(rename = "sugars_100g", default, deserialize_with = "lenient_f64")]
    pub sugars: Option<f64>,
    /// Saturated fat
    #[serde(rename = "saturated-fat_100g", default, deserialize_with = "lenient_f64")]
    pub saturated_fat: Option<f64>,
    /// Sodium
    #[serde(rename = "sodium_100g", default, deserialize_with = "lenient_f64")]
    pub sodium: Option<f64>,
    /// Cholesterol
    #[serde(rename = "cholesterol_100g", default, deserialize_with = "lenient_f64")]
    pub cholesterol: Option<f64>,
}

/// Map one Open Food Facts product to a [`CanonicalFood`]
///
/// `fallback_code` identifies the product when the record carries no code of
/// its own, as happens for some barcode lookups.
#[must_use]
pub fn transform_product(product: &OffProduct, fallback_code: &str) -> CanonicalFood {
    let n = &product.nutriments;
    let grams = |value: Option<f64>| round_to_tenth(value.unwrap_or(0.0));
    let milligrams = |value: Option<f64>| round_to_u32(value.unwrap_or(0.0) * MILLIGRAMS_PER_GRAM);

    let serving_grams = product
        .serving_quantity
        .filter(|q| q.is_finite() && *q > 0.0)
        .unwrap_or(DEFAULT_SERVING_GRAMS);
    let serving_size = non_empty(product.serving_size.as_deref())
        .map_or_else(|| format!("{serving_grams}g"), str::to_owned);

    CanonicalFood {
        id: non_empty(product.code.as_deref())
            .unwrap_or(fallback_code)
            .to_owned(),
        name: non_empty(product.product_name.as_deref())
            .or_else(|| non_empty(product.product_name_en.as_deref()))
            .unwrap_or(UNKNOWN_PRODUCT_NAME)
            .to_owned(),
        brand: product
            .brands
            .as_deref()
            .and_then(|brands| brands.split(',').find_map(|b| non_empty(Some(b))))
            .unwrap_or(DEFAULT_BRAND)
            .to_owned(),
        source: FoodSource::OpenFoodFacts,
        serving_size,
        serving_grams,
        calories: round_to_u32(n.energy_kcal.unwrap_or(0.0)),
        protein: grams(n.proteins),
        carbs: grams(n.carbohydrates),
        fat: grams(n.fat),
        fiber: grams(n.fiber),
        sugar: grams(n.sugars),
        saturated_fat: grams(n.saturated_fat),
        sodium: milligrams(n.sodium),
        cholesterol: milligrams(n.cholesterol),
        ingredients: non_empty(product.ingredients_text.as_deref()).map(str::to_owned),
        category: non_empty(product.categories.as_deref()).map(str::to_owned),
        publication_date: None,
    }
}
