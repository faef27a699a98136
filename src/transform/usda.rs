// ABOUTME: USDA FoodData Central wire types and their mapping to CanonicalFood
// ABOUTME: Matches nutrients by case-insensitive name fragments, first match per field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{
    lenient, lenient_f64, lenient_string, lenient_u64, non_empty, round_to_tenth, round_to_u32,
    skip_malformed,
};
use crate::constants::usda::{DEFAULT_BRAND, ID_PREFIX, UNKNOWN_FOOD_NAME};
use crate::models::{CanonicalFood, FoodSource};
use serde::Deserialize;

/// Gram weight assumed when upstream gives no usable serving size
const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// `/foods/search` response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaSearchResponse {
    /// Matching foods, in upstream relevance order
    #[serde(default, deserialize_with = "skip_malformed")]
    pub foods: Vec<UsdaFood>,
    /// Total number of matches upstream
    #[serde(default, deserialize_with = "lenient")]
    pub total_hits: Option<u64>,
    /// Page returned
    #[serde(default, deserialize_with = "lenient")]
    pub current_page: Option<u32>,
    /// Number of pages available
    #[serde(default, deserialize_with = "lenient")]
    pub total_pages: Option<u32>,
}

/// One USDA food, from either a search result or a `/food/{fdcId}` detail record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaFood {
    /// `FoodData` Central identifier
    #[serde(default, deserialize_with = "lenient_u64")]
    pub fdc_id: u64,
    /// Food description
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Brand owner (branded foods)
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_owner: Option<String>,
    /// Brand name (branded foods)
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_name: Option<String>,
    /// Serving size quantity
    #[serde(default, deserialize_with = "lenient_f64")]
    pub serving_size: Option<f64>,
    /// Serving size unit (`g`, `ml`, ...)
    #[serde(default, deserialize_with = "lenient_string")]
    pub serving_size_unit: Option<String>,
    /// Nutrient list
    #[serde(default, deserialize_with = "skip_malformed")]
    pub food_nutrients: Vec<UsdaNutrient>,
    /// Ingredient statement
    #[serde(default, deserialize_with = "lenient_string")]
    pub ingredients: Option<String>,
    /// Food category, a label in search results and a record in details
    #[serde(default, deserialize_with = "lenient")]
    pub food_category: Option<UsdaCategory>,
    /// Publication date (detail records)
    #[serde(default, deserialize_with = "lenient_string")]
    pub publication_date: Option<String>,
    /// Publication date as spelled in search results
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_date: Option<String>,
}

/// USDA food category in either of its upstream shapes
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UsdaCategory {
    /// Plain label (search results)
    Label(String),
    /// Category record (detail responses)
    Record {
        /// Category label
        #[serde(default)]
        description: Option<String>,
    },
}

impl UsdaCategory {
    fn label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Record { description } => description.as_deref(),
        }
    }
}

/// One nutrient entry
///
/// Search results use `nutrientName`/`unitName`/`value`; detail records nest
/// the name under `nutrient` and carry the quantity in `amount`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaNutrient {
    /// Nutrient name (search shape)
    #[serde(default, deserialize_with = "lenient_string")]
    pub nutrient_name: Option<String>,
    /// Unit (search shape)
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_name: Option<String>,
    /// Quantity (search shape)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
    /// Nutrient descriptor (detail shape)
    #[serde(default, deserialize_with = "lenient")]
    pub nutrient: Option<UsdaNutrientInfo>,
    /// Quantity (detail shape)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
}

/// Nutrient descriptor nested in detail records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaNutrientInfo {
    /// Nutrient name
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Unit
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_name: Option<String>,
}

impl UsdaNutrient {
    fn name(&self) -> &str {
        self.nutrient_name
            .as_deref()
            .or_else(|| self.nutrient.as_ref().and_then(|n| n.name.as_deref()))
            .unwrap_or_default()
    }

    fn unit(&self) -> &str {
        self.unit_name
            .as_deref()
            .or_else(|| self.nutrient.as_ref().and_then(|n| n.unit_name.as_deref()))
            .unwrap_or_default()
    }

    fn quantity(&self) -> f64 {
        self.value.or(self.amount).unwrap_or(0.0)
    }
}

/// Canonical nutrient fields filled from the USDA nutrient list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugar,
    Sodium,
    Cholesterol,
    SaturatedFat,
}

impl Nutrient {
    const ALL: [Self; 9] = [
        Self::Calories,
        Self::Protein,
        Self::Carbs,
        Self::Fat,
        Self::Fiber,
        Self::Sugar,
        Self::Sodium,
        Self::Cholesterol,
        Self::SaturatedFat,
    ];

    /// Whether a lower-cased nutrient name and unit identify this field
    fn matches(self, name: &str, unit: &str) -> bool {
        match self {
            Self::Calories => name.contains("energy") && unit.contains("kcal"),
            Self::Protein => name.contains("protein"),
            Self::Carbs => name.contains("carbohydrate"),
            Self::Fat => name.contains("total lipid") || name.contains("fat, total"),
            Self::Fiber => name.contains("fiber"),
            Self::Sugar => name.contains("sugars, total"),
            Self::Sodium => name.contains("sodium"),
            Self::Cholesterol => name.contains("cholesterol"),
            Self::SaturatedFat => name.contains("fatty acids, total saturated"),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Scan nutrients in upstream order; the first entry matching a field wins
fn extract_nutrients(nutrients: &[UsdaNutrient]) -> [f64; Nutrient::ALL.len()] {
    let mut found: [Option<f64>; Nutrient::ALL.len()] = [None; Nutrient::ALL.len()];

    for entry in nutrients {
        let name = entry.name().to_lowercase();
        let unit = entry.unit().to_lowercase();
        for field in Nutrient::ALL {
            let slot = &mut found[field.index()];
            if slot.is_none() && field.matches(&name, &unit) {
                *slot = Some(entry.quantity());
            }
        }
    }

    found.map(|value| value.unwrap_or(0.0))
}

/// Serving label and gram equivalent
fn serving(food: &UsdaFood) -> (String, f64) {
    let Some(size) = food.serving_size.filter(|s| s.is_finite() && *s > 0.0) else {
        return (format!("{DEFAULT_SERVING_GRAMS}g"), DEFAULT_SERVING_GRAMS);
    };

    let unit = non_empty(food.serving_size_unit.as_deref()).unwrap_or("g");
    let grams = if unit.eq_ignore_ascii_case("g") || unit.eq_ignore_ascii_case("grm") {
        size
    } else {
        DEFAULT_SERVING_GRAMS
    };

    (format!("{size}{unit}"), grams)
}

/// Map one USDA food to a [`CanonicalFood`]
#[must_use]
pub fn transform_usda_food(food: &UsdaFood) -> CanonicalFood {
    let nutrients = extract_nutrients(&food.food_nutrients);
    let value = |field: Nutrient| nutrients[field.index()];
    let (serving_size, serving_grams) = serving(food);

    CanonicalFood {
        id: format!("{ID_PREFIX}{}", food.fdc_id),
        name: non_empty(food.description.as_deref())
            .unwrap_or(UNKNOWN_FOOD_NAME)
            .to_owned(),
        brand: non_empty(food.brand_owner.as_deref())
            .or_else(|| non_empty(food.brand_name.as_deref()))
            .unwrap_or(DEFAULT_BRAND)
            .to_owned(),
        source: FoodSource::Usda,
        serving_size,
        serving_grams,
        calories: round_to_u32(value(Nutrient::Calories)),
        protein: round_to_tenth(value(Nutrient::Protein)),
        carbs: round_to_tenth(value(Nutrient::Carbs)),
        fat: round_to_tenth(value(Nutrient::Fat)),
        fiber: round_to_tenth(value(Nutrient::Fiber)),
        sugar: round_to_tenth(value(Nutrient::Sugar)),
        saturated_fat: round_to_tenth(value(Nutrient::SaturatedFat)),
        sodium: round_to_u32(value(Nutrient::Sodium)),
        cholesterol: round_to_u32(value(Nutrient::Cholesterol)),
        ingredients: non_empty(food.ingredients.as_deref()).map(str::to_owned),
        category: food
            .food_category
            .as_ref()
            .and_then(UsdaCategory::label)
            .and_then(|label| non_empty(Some(label)))
            .map(str::to_owned),
        publication_date: non_empty(food.publication_date.as_deref())
            .or_else(|| non_empty(food.published_date.as_deref()))
            .map(str::to_owned),
    }
}
