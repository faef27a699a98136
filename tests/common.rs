// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Builds configs pointed at mock upstreams and canned provider payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `forage`

use forage::{
    cache::{memory::InMemoryCache, Cache},
    config::ServerConfig,
    external::{
        ExerciseDbClient, ExerciseDbConfig, OpenFoodFactsClient, OpenFoodFactsConfig, UsdaClient,
        UsdaClientConfig,
    },
    server::{build_router, ServerResources},
    utils::http_client::{create_client, HttpClientConfig},
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// Server config whose USDA and Open Food Facts clients point at `upstream`
pub fn proxy_config(upstream: &str) -> ServerConfig {
    ServerConfig {
        usda: UsdaClientConfig {
            api_key: "test-usda-key".to_owned(),
            base_url: upstream.to_owned(),
            ..UsdaClientConfig::default()
        },
        open_food_facts: OpenFoodFactsConfig {
            base_url: upstream.to_owned(),
            ..OpenFoodFactsConfig::default()
        },
        ..ServerConfig::default()
    }
}

/// Full application router backed by `config`
pub fn proxy_router(config: ServerConfig) -> axum::Router {
    build_router(Arc::new(ServerResources::new(config)))
}

pub fn usda_client(upstream: &str) -> UsdaClient {
    UsdaClient::new(
        UsdaClientConfig {
            api_key: "test-usda-key".to_owned(),
            base_url: upstream.to_owned(),
            ..UsdaClientConfig::default()
        },
        create_client(&HttpClientConfig::default()),
    )
}

pub fn open_food_facts_client(upstream: &str) -> OpenFoodFactsClient {
    OpenFoodFactsClient::new(
        OpenFoodFactsConfig {
            base_url: upstream.to_owned(),
            ..OpenFoodFactsConfig::default()
        },
        create_client(&HttpClientConfig::default()),
    )
}

/// `ExerciseDB` client over a fresh in-memory cache
pub fn exercise_client(upstream: &str, max_age: Duration) -> ExerciseDbClient {
    ExerciseDbClient::new(
        ExerciseDbConfig {
            base_url: format!("{upstream}/api/v1"),
            api_key: None,
            list_limit: 50,
            cache_max_age: max_age,
        },
        create_client(&HttpClientConfig::default()),
        Cache::Memory(InMemoryCache::new(4)),
    )
}

/// USDA food in the search-result nutrient shape
pub fn usda_search_food() -> Value {
    json!({
        "fdcId": 171_705,
        "description": "Apples, raw, with skin",
        "dataType": "SR Legacy",
        "foodCategory": "Fruits and Fruit Juices",
        "publicationDate": "4/1/2019",
        "foodNutrients": [
            { "nutrientName": "Protein", "unitName": "G", "value": 0.26 },
            { "nutrientName": "Total lipid (fat)", "unitName": "G", "value": 0.17 },
            { "nutrientName": "Carbohydrate, by difference", "unitName": "G", "value": 13.81 },
            { "nutrientName": "Energy", "unitName": "KCAL", "value": 52.0 },
            { "nutrientName": "Fiber, total dietary", "unitName": "G", "value": 2.4 },
            { "nutrientName": "Sugars, total including NLEA", "unitName": "G", "value": 10.39 },
            { "nutrientName": "Sodium, Na", "unitName": "MG", "value": 1.0 }
        ]
    })
}

pub fn usda_search_response(foods: Vec<Value>) -> Value {
    json!({
        "totalHits": foods.len(),
        "currentPage": 1,
        "totalPages": 1,
        "foods": foods
    })
}

/// Open Food Facts product lookup body
pub fn off_product_response(code: &str) -> Value {
    json!({
        "code": code,
        "status": 1,
        "status_verbose": "product found",
        "product": {
            "code": code,
            "product_name": "Nutella",
            "brands": "Ferrero, Nutella",
            "serving_size": "15 g",
            "serving_quantity": "15",
            "nutriments": {
                "energy-kcal_100g": 539,
                "proteins_100g": 6.3,
                "carbohydrates_100g": 57.5,
                "fat_100g": 30.9,
                "sugars_100g": 56.3,
                "saturated-fat_100g": 10.6,
                "sodium_100g": 0.0428
            }
        }
    })
}

/// One `ExerciseDB` v1 exercise
pub fn exercise_json(id: &str, name: &str, body_part: &str) -> Value {
    json!({
        "exerciseId": id,
        "name": name,
        "gifUrl": format!("https://static.exercisedb.dev/media/{id}.gif"),
        "targetMuscles": ["pectorals"],
        "bodyParts": [body_part],
        "equipments": ["barbell"],
        "secondaryMuscles": ["triceps"],
        "instructions": ["Lie on the bench.", "Press the bar up."]
    })
}

/// `{success, data}` envelope
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}
