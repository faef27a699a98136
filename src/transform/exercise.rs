// ABOUTME: ExerciseDB wire types and their mapping to CanonicalExercise
// ABOUTME: Accepts enveloped or bare payloads and both v1 and legacy field spellings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{lenient_string, one_or_many, string_or_number};
use crate::constants::exercise_db::{DEFAULT_EQUIPMENT, FALLBACK_SLUG, FORM_ANALYSIS_PATH};
use crate::models::{CanonicalExercise, Difficulty, ExerciseCategory};
use serde::Deserialize;

/// Upstream response, either wrapped as `{success, data}` or sent bare
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{ "success": bool, "data": T }`
    Wrapped {
        /// Upstream success flag
        #[serde(default)]
        success: Option<bool>,
        /// Payload
        data: T,
    },
    /// Payload without an envelope
    Bare(T),
}

impl<T> Envelope<T> {
    /// Payload, or `None` when the envelope reports failure
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Wrapped {
                success: Some(false),
                ..
            } => None,
            Self::Wrapped { data, .. } | Self::Bare(data) => Some(data),
        }
    }
}

/// One `ExerciseDB` exercise in either the v1 or the legacy spelling
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    /// Identifier (`exerciseId` in v1, `id` in legacy)
    #[serde(alias = "id", default, deserialize_with = "string_or_number")]
    pub exercise_id: String,
    /// Exercise name
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    /// Demonstration GIF
    #[serde(default, deserialize_with = "lenient_string")]
    pub gif_url: Option<String>,
    /// Primary muscles (`targetMuscles` or legacy `target`)
    #[serde(alias = "target", default, deserialize_with = "one_or_many")]
    pub target_muscles: Vec<String>,
    /// Secondary muscles
    #[serde(default, deserialize_with = "one_or_many")]
    pub secondary_muscles: Vec<String>,
    /// Body parts (`bodyParts` or legacy `bodyPart`)
    #[serde(alias = "bodyPart", default, deserialize_with = "one_or_many")]
    pub body_parts: Vec<String>,
    /// Equipment (`equipments` or legacy `equipment`)
    #[serde(alias = "equipment", default, deserialize_with = "one_or_many")]
    pub equipments: Vec<String>,
    /// Step-by-step instructions
    #[serde(default, deserialize_with = "one_or_many")]
    pub instructions: Vec<String>,
}

/// Catalog entry returned by the body part, equipment and muscle listings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// `{ "name": "chest" }`
    Named {
        /// Entry name
        name: String,
    },
    /// `"chest"`
    Plain(String),
}

impl CatalogEntry {
    /// Entry name
    #[must_use]
    pub fn into_name(self) -> String {
        match self {
            Self::Named { name } | Self::Plain(name) => name,
        }
    }
}

/// URL-safe slug for an exercise name
///
/// Lower-cases the name, collapses every run of characters outside
/// `[a-z0-9]` into one hyphen and strips leading and trailing hyphens. A name
/// with no ASCII letters or digits yields `exercise`.
#[must_use]
pub fn exercise_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

fn description(record: &ExerciseRecord) -> String {
    if record.target_muscles.is_empty() {
        "Targets multiple muscle groups".to_owned()
    } else {
        format!("Targets {}", record.target_muscles.join(", "))
    }
}

/// Map one `ExerciseDB` record to a [`CanonicalExercise`]
#[must_use]
pub fn transform_exercise(record: ExerciseRecord) -> CanonicalExercise {
    let category = record
        .body_parts
        .first()
        .map_or(ExerciseCategory::FullBody, |bp| {
            ExerciseCategory::from_body_part(bp)
        });
    let equipment = record
        .equipments
        .iter()
        .map(|e| e.trim())
        .find(|e| !e.is_empty())
        .unwrap_or(DEFAULT_EQUIPMENT)
        .to_owned();
    let description = description(&record);
    let form_analysis_url = format!(
        "{FORM_ANALYSIS_PATH}/{}?exerciseId={}",
        exercise_slug(&record.name),
        urlencoding::encode(&record.exercise_id)
    );
    let gif_url = record.gif_url.unwrap_or_default();

    CanonicalExercise {
        id: record.exercise_id,
        name: record.name,
        description,
        image_url: gif_url.clone(),
        gif_url,
        target_muscles: record.target_muscles,
        secondary_muscles: record.secondary_muscles,
        body_parts: record.body_parts,
        equipment,
        category,
        difficulty: Difficulty::Intermediate,
        form_analysis_url,
        instructions: record.instructions,
    }
}

/// Map a batch of records, preserving upstream order
#[must_use]
pub fn transform_exercises(records: Vec<ExerciseRecord>) -> Vec<CanonicalExercise> {
    records.into_iter().map(transform_exercise).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::LenientList;
    use serde_json::json;

    #[test]
    fn test_v1_enveloped_payload() {
        let envelope: Envelope<Vec<ExerciseRecord>> = serde_json::from_value(json!({
            "success": true,
            "metadata": { "totalExercises": 1 },
            "data": [{
                "exerciseId": "trmte8s",
                "name": "Band Shrug",
                "gifUrl": "https://static.exercisedb.dev/media/trmte8s.gif",
                "targetMuscles": ["traps"],
                "bodyParts": ["neck"],
                "equipments": ["band"],
                "secondaryMuscles": ["shoulders"],
                "instructions": ["Step:1 Stand with feet shoulder-width apart."]
            }]
        }))
        .unwrap();

        let records = envelope.into_data().unwrap();
        let exercise = transform_exercise(records[0].clone());

        assert_eq!(exercise.id, "trmte8s");
        assert_eq!(exercise.description, "Targets traps");
        assert_eq!(exercise.equipment, "band");
        assert_eq!(exercise.category, ExerciseCategory::FullBody);
        assert_eq!(exercise.gif_url, exercise.image_url);
        assert_eq!(exercise.difficulty, Difficulty::Intermediate);
        assert_eq!(
            exercise.form_analysis_url,
            "/form-analysis/band-shrug?exerciseId=trmte8s"
        );
        assert_eq!(exercise.instructions.len(), 1);
    }

    #[test]
    fn test_legacy_bare_payload() {
        let envelope: Envelope<ExerciseRecord> = serde_json::from_value(json!({
            "id": "0001",
            "name": "3/4 sit-up",
            "bodyPart": "waist",
            "equipment": "body weight",
            "target": "abs",
            "gifUrl": "https://example.com/0001.gif"
        }))
        .unwrap();

        let exercise = transform_exercise(envelope.into_data().unwrap());
        assert_eq!(exercise.id, "0001");
        assert_eq!(exercise.body_parts, vec!["waist".to_owned()]);
        assert_eq!(exercise.category, ExerciseCategory::Core);
        assert_eq!(exercise.equipment, "body weight");
        assert_eq!(exercise.target_muscles, vec!["abs".to_owned()]);
        assert_eq!(
            exercise.form_analysis_url,
            "/form-analysis/3-4-sit-up?exerciseId=0001"
        );
    }

    #[test]
    fn test_failed_envelope_has_no_data() {
        let envelope: Envelope<Vec<ExerciseRecord>> =
            serde_json::from_value(json!({ "success": false, "data": [] })).unwrap();
        assert!(envelope.into_data().is_none());
    }

    #[test]
    fn test_defaults_for_sparse_record() {
        let exercise = transform_exercise(ExerciseRecord {
            exercise_id: "x1".to_owned(),
            name: "Burpee".to_owned(),
            ..ExerciseRecord::default()
        });
        assert_eq!(exercise.equipment, "bodyweight");
        assert_eq!(exercise.category, ExerciseCategory::FullBody);
        assert_eq!(exercise.gif_url, "");
    }

    #[test]
    fn test_slug_rules() {
        assert_eq!(exercise_slug("Barbell Bench Press"), "barbell-bench-press");
        assert_eq!(exercise_slug("  --Push-Up (Wide)--  "), "push-up-wide");
        assert_eq!(exercise_slug("Dumbbell   Curl!!"), "dumbbell-curl");
        assert_eq!(exercise_slug("!!!"), "exercise");
        assert_eq!(exercise_slug(""), "exercise");
    }

    #[test]
    fn test_exercise_id_is_encoded_in_form_url() {
        let exercise = transform_exercise(ExerciseRecord {
            exercise_id: "a b&c=d".to_owned(),
            name: "Push Up".to_owned(),
            ..ExerciseRecord::default()
        });
        assert_eq!(
            exercise.form_analysis_url,
            "/form-analysis/push-up?exerciseId=a%20b%26c%3Dd"
        );
        assert_eq!(exercise.id, "a b&c=d");
    }

    #[test]
    fn test_malformed_fields_degrade_to_defaults() {
        let records: LenientList<ExerciseRecord> = serde_json::from_value(json!([
            { "exerciseId": 17, "name": null, "gifUrl": 5, "bodyParts": { "x": 1 }, "instructions": [1, 2] },
            "garbage",
            { "exerciseId": "ok", "name": "Plank", "bodyParts": ["waist"] }
        ]))
        .unwrap();

        let exercises = transform_exercises(records.into_inner());
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].id, "17");
        assert_eq!(exercises[0].name, "");
        assert_eq!(exercises[0].gif_url, "5");
        assert!(exercises[0].body_parts.is_empty());
        assert!(exercises[0].instructions.is_empty());
        assert_eq!(exercises[0].category, ExerciseCategory::FullBody);
        assert_eq!(exercises[1].category, ExerciseCategory::Core);
    }

    #[test]
    fn test_non_array_listing_is_still_an_error() {
        assert!(serde_json::from_value::<LenientList<ExerciseRecord>>(json!({ "error": "x" })).is_err());
    }

    #[test]
    fn test_catalog_entry_shapes() {
        let entries: Vec<CatalogEntry> =
            serde_json::from_value(json!([{ "name": "chest" }, "back"])).unwrap();
        let names: Vec<String> = entries.into_iter().map(CatalogEntry::into_name).collect();
        assert_eq!(names, vec!["chest".to_owned(), "back".to_owned()]);
    }
}
