// ABOUTME: Canonical exercise record and its fixed category lookup
// ABOUTME: CanonicalExercise, ExerciseCategory, and Difficulty definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Training category derived from an exercise's body part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseCategory {
    /// Chest and shoulders
    Push,
    /// Back and arms
    Pull,
    /// Upper and lower legs
    Legs,
    /// Waist
    Core,
    /// Cardio
    Cardio,
    /// Anything unmapped
    #[serde(rename = "Full Body")]
    FullBody,
}

impl ExerciseCategory {
    /// Every category, in display order
    pub const ALL: [Self; 6] = [
        Self::Push,
        Self::Pull,
        Self::Legs,
        Self::Core,
        Self::Cardio,
        Self::FullBody,
    ];

    /// Map an upstream body part onto a category
    ///
    /// Unknown or empty body parts map to [`ExerciseCategory::FullBody`].
    #[must_use]
    pub fn from_body_part(body_part: &str) -> Self {
        match body_part.trim().to_lowercase().as_str() {
            "chest" | "shoulders" => Self::Push,
            "back" | "arms" | "upper arms" | "lower arms" => Self::Pull,
            "legs" | "upper legs" | "lower legs" => Self::Legs,
            "waist" => Self::Core,
            "cardio" => Self::Cardio,
            _ => Self::FullBody,
        }
    }

    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
            Self::FullBody => "Full Body",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exercise difficulty
///
/// `ExerciseDB` publishes no difficulty signal, so the only level a
/// transformed record can carry is [`Difficulty::Intermediate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Intermediate
    #[default]
    Intermediate,
}

/// One normalized exercise record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalExercise {
    /// Upstream exercise identifier
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Summary built from the target muscles
    pub description: String,
    /// Animated demonstration URL
    pub gif_url: String,
    /// Same value as `gif_url`
    pub image_url: String,
    /// Primary muscles, in upstream order
    pub target_muscles: Vec<String>,
    /// Secondary muscles, in upstream order
    pub secondary_muscles: Vec<String>,
    /// Body parts, in upstream order
    pub body_parts: Vec<String>,
    /// First upstream equipment entry, `bodyweight` when none
    pub equipment: String,
    /// Category derived from the first body part
    pub category: ExerciseCategory,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Form analysis page for this exercise
    pub form_analysis_url: String,
    /// Step-by-step instructions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(ExerciseCategory::from_body_part("chest"), ExerciseCategory::Push);
        assert_eq!(ExerciseCategory::from_body_part("Shoulders"), ExerciseCategory::Push);
        assert_eq!(ExerciseCategory::from_body_part("upper arms"), ExerciseCategory::Pull);
        assert_eq!(ExerciseCategory::from_body_part("lower legs"), ExerciseCategory::Legs);
        assert_eq!(ExerciseCategory::from_body_part("waist"), ExerciseCategory::Core);
        assert_eq!(ExerciseCategory::from_body_part("cardio"), ExerciseCategory::Cardio);
        assert_eq!(ExerciseCategory::from_body_part("neck"), ExerciseCategory::FullBody);
        assert_eq!(ExerciseCategory::from_body_part(""), ExerciseCategory::FullBody);
    }

    #[test]
    fn test_category_serializes_label() {
        assert_eq!(
            serde_json::to_value(ExerciseCategory::FullBody).unwrap(),
            serde_json::json!("Full Body")
        );
        assert_eq!(
            serde_json::to_value(Difficulty::Intermediate).unwrap(),
            serde_json::json!("intermediate")
        );
    }
}
