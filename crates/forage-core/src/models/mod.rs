// ABOUTME: Canonical record shapes shared by every provider client
// ABOUTME: Re-exports food and exercise models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! Canonical records
//!
//! Provider payloads are mapped into these shapes by the transform layer. They
//! are constructed fresh on every transform and never mutated afterwards.

/// Canonical exercise record
pub mod exercise;
/// Canonical food record
pub mod food;

pub use exercise::{CanonicalExercise, Difficulty, ExerciseCategory};
pub use food::{CanonicalFood, FoodSource};
