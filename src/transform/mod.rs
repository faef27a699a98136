// ABOUTME: Pure mappings from upstream provider payloads to canonical food and exercise records
// ABOUTME: Shared rounding rules and lenient deserializers for loosely typed upstream JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! Upstream payload transforms
//!
//! Every function here is deterministic and free of I/O. Missing or malformed
//! upstream fields degrade to defaults; a well-formed record never produces
//! an error.

/// `ExerciseDB` exercise records
pub mod exercise;
/// Open Food Facts products
pub mod open_food_facts;
/// USDA `FoodData` Central foods
pub mod usda;

pub use exercise::{exercise_slug, transform_exercise, ExerciseRecord};
pub use open_food_facts::{transform_product, OffProduct};
pub use usda::{transform_usda_food, UsdaFood};

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Round a gram quantity to one decimal place; negative or non-finite input becomes 0
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Round to the nearest whole unit; negative or non-finite input becomes 0
#[must_use]
pub fn round_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX
    value.round() as u32
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accept a number, a numeric string, or anything else (read as absent)
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Number(n)) => Some(n),
        Some(Lenient::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Lenient::Other(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextLike {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

/// Accept a string or a number as text; anything else reads as absent
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextLike>::deserialize(deserializer)? {
        Some(TextLike::Text(s)) => Some(s),
        Some(TextLike::Number(n)) => Some(n.to_string()),
        Some(TextLike::Other(_)) | None => None,
    })
}

/// Accept an identifier sent either as a string or as a number; empty otherwise
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(Option::unwrap_or_default)
}

/// Accept a non-negative integer or its decimal string; 0 otherwise
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextLike>::deserialize(deserializer)? {
        Some(TextLike::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(TextLike::Text(s)) => s.trim().parse().unwrap_or_default(),
        Some(TextLike::Other(_)) | None => 0,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
    Other(IgnoredAny),
}

/// Accept a single string, a list of strings, or anything else (read as empty)
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values.into_iter().flatten().collect(),
        Some(OneOrMany::Other(_)) | None => Vec::new(),
    })
}

/// Decode a nested value, reading a malformed one as absent
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a nested value, reading a malformed one as its default
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// Decode a record list, dropping entries that are not records at all
pub(crate) fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => decode_each(items),
        _ => Vec::new(),
    })
}

fn decode_each<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Top-level upstream array whose unreadable entries are skipped
///
/// A body that is not an array at all is still a decode error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LenientList<T>(pub Vec<T>);

impl<T> LenientList<T> {
    /// Decoded entries, in upstream order
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LenientList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Value>::deserialize(deserializer).map(|items| Self(decode_each(items)))
    }
}

/// Trimmed, non-empty text or `None`
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
