// ABOUTME: External API client modules for nutrition and exercise data providers
// ABOUTME: USDA FoodData Central, Open Food Facts and ExerciseDB behind explicit config structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! External API Clients
//!
//! Every client operation takes a [`CancellationToken`](crate::cancellation::CancellationToken)
//! and returns an [`AppResult`](crate::errors::AppResult): an empty result is
//! `Ok(vec![])`, an upstream failure is an error carrying the upstream status.

/// `ExerciseDB` exercise catalog client
pub mod exercise_db_client;
/// Open Food Facts product client
pub mod open_food_facts_client;
/// Shared request execution and response classification
pub mod upstream;
/// USDA `FoodData` Central client
pub mod usda_client;

pub use exercise_db_client::{ExerciseDbClient, ExerciseDbConfig, ExerciseFilters};
pub use open_food_facts_client::{is_valid_barcode, OpenFoodFactsClient, OpenFoodFactsConfig};
pub use usda_client::{build_search_request, FoodSearchOptions, UsdaClient, UsdaClientConfig};
