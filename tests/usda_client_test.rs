// ABOUTME: Integration tests for the USDA FoodData Central client against a mock upstream
// ABOUTME: Covers request shape, limit truncation, failure classification and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use forage::cancellation::CancellationToken;
use forage::errors::ErrorCode;
use forage::external::FoodSearchOptions;
use forage::models::FoodSource;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_sends_key_and_default_data_types() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .and(query_param("api_key", "test-usda-key"))
        .and(query_param("query", "apple"))
        .and(query_param("dataType", "Foundation,SR Legacy,Survey (FNDDS)"))
        .and(query_param("pageSize", "25"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::usda_search_response(vec![common::usda_search_food()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let foods = client
        .search_foods("apple", &FoodSearchOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(foods.len(), 1);
    let apple = &foods[0];
    assert_eq!(apple.id, "usda_171705");
    assert_eq!(apple.name, "Apples, raw, with skin");
    assert_eq!(apple.brand, "USDA");
    assert_eq!(apple.source, FoodSource::Usda);
    assert_eq!(apple.calories, 52);
    assert!((apple.carbs - 13.8).abs() < f64::EPSILON);
    assert!((apple.sugar - 10.4).abs() < f64::EPSILON);
    assert_eq!(apple.sodium, 1);
    assert_eq!(apple.serving_size, "100g");
    assert_eq!(apple.category.as_deref(), Some("Fruits and Fruit Juices"));
}

#[tokio::test]
async fn test_search_truncates_to_limit_and_forwards_paging() {
    let server = MockServer::start().await;
    let foods = (0..5)
        .map(|i| {
            let mut food = common::usda_search_food();
            food["fdcId"] = json!(1000 + i);
            food
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .and(query_param("dataType", "Branded"))
        .and(query_param("pageSize", "200"))
        .and(query_param("pageNumber", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::usda_search_response(foods)))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let options = FoodSearchOptions {
        limit: Some(2),
        data_types: Some(vec!["Branded".to_owned()]),
        page_size: Some(500),
        page_number: Some(3),
    };
    let foods = client
        .search_foods("yogurt", &options, &CancellationToken::new())
        .await
        .unwrap();

    let ids: Vec<_> = foods.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["usda_1000", "usda_1001"]);
}

#[tokio::test]
async fn test_requested_page_size_bounds_results_without_limit() {
    let server = MockServer::start().await;
    let foods = (0..40)
        .map(|i| {
            let mut food = common::usda_search_food();
            food["fdcId"] = json!(2000 + i);
            food
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .and(query_param("pageSize", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::usda_search_response(foods)))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let options = FoodSearchOptions {
        page_size: Some(40),
        ..FoodSearchOptions::default()
    };
    let foods = client
        .search_foods("rice", &options, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(foods.len(), 40);
}

#[tokio::test]
async fn test_malformed_food_does_not_fail_search() {
    let server = MockServer::start().await;
    let mut broken = common::usda_search_food();
    broken["fdcId"] = json!(null);
    broken["description"] = json!(["not", "text"]);
    broken["publishedDate"] = json!("2019-04-01");

    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::usda_search_response(vec![
            common::usda_search_food(),
            broken,
            json!("garbage"),
        ])))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let foods = client
        .search_foods("apple", &FoodSearchOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(foods.len(), 2);
    assert_eq!(foods[0].id, "usda_171705");
    assert_eq!(foods[1].id, "usda_0");
    assert_eq!(foods[1].name, "Unknown Food");
    assert_eq!(foods[1].calories, 52);
}

#[tokio::test]
async fn test_empty_results_are_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foods": [] })))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let foods = client
        .search_foods("zzzz", &FoodSearchOptions::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(foods.is_empty());
}

#[tokio::test]
async fn test_empty_query_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let error = client
        .search_foods("   ", &FoodSearchOptions::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(error.message, "Query parameter is required");
}

#[tokio::test]
async fn test_rate_limit_is_an_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("OVER_RATE_LIMIT"))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let error = client
        .search_foods("apple", &FoodSearchOptions::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    assert_eq!(error.upstream_status, Some(429));
}

#[tokio::test]
async fn test_invalid_key_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let error = client
        .search_foods("apple", &FoodSearchOptions::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
    assert_eq!(error.upstream_status, Some(403));
}

#[tokio::test]
async fn test_food_details_maps_nested_nutrient_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/food/2345"))
        .and(query_param("api_key", "test-usda-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fdcId": 2345,
            "description": "Greek yogurt, plain",
            "brandOwner": "Dairy Co",
            "servingSize": 170,
            "servingSizeUnit": "g",
            "foodCategory": { "description": "Dairy and Egg Products" },
            "foodNutrients": [
                { "nutrient": { "name": "Protein", "unitName": "g" }, "amount": 10.3 },
                { "nutrient": { "name": "Energy", "unitName": "kcal" }, "amount": 97 },
                { "nutrient": { "name": "Cholesterol", "unitName": "mg" }, "amount": 13 }
            ]
        })))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let food = client
        .get_food_details(2345, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(food.id, "usda_2345");
    assert_eq!(food.brand, "Dairy Co");
    assert_eq!(food.serving_size, "170g");
    assert!((food.serving_grams - 170.0).abs() < f64::EPSILON);
    assert_eq!(food.calories, 97);
    assert_eq!(food.cholesterol, 13);
    assert_eq!(food.category.as_deref(), Some("Dairy and Egg Products"));
}

#[tokio::test]
async fn test_food_details_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/food/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let error = client
        .get_food_details(1, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.http_status(), 404);
}

#[tokio::test]
async fn test_check_connection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .and(query_param("query", "apple"))
        .and(query_param("pageSize", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foods": [] })))
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    assert!(client.check_connection(&CancellationToken::new()).await);

    let down = common::usda_client("http://127.0.0.1:9");
    assert!(!down.check_connection(&CancellationToken::new()).await);
}

#[tokio::test]
async fn test_cancelled_search_returns_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "foods": [] }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = common::usda_client(&server.uri());
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let error = client
        .search_foods("apple", &FoodSearchOptions::default(), &token)
        .await
        .unwrap_err();
    assert!(error.is_cancelled());
    assert_eq!(error.http_status(), 503);
}
