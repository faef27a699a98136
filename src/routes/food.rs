// ABOUTME: CORS proxy endpoints relaying browser food lookups to Open Food Facts and USDA
// ABOUTME: GET-only JSON pass-through with OPTIONS preflight and upstream status preservation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! Food proxy routes
//!
//! | Route | Upstream |
//! |-------|----------|
//! | `GET /api/food/barcode/:barcode` | Open Food Facts product lookup |
//! | `GET /api/food/search-openfoodfacts?query=&pageSize=` | Open Food Facts search |
//! | `GET /api/food/search?query=&pageSize=` | USDA `FoodData` Central search |
//!
//! Every endpoint answers `OPTIONS` with an empty 200, rejects other non-GET
//! methods with 405 and returns the upstream JSON unmodified on success. No
//! endpoint caches: each call makes exactly one upstream request.
//!
//! The request deadline is enforced inside the handlers so that a timed-out
//! upstream call still leaves through the CORS layers as a JSON error.

use crate::constants::{messages, service_names};
use crate::errors::{AppError, AppResult};
use crate::external::usda_client::FoodSearchOptions;
use crate::server::ServerResources;
use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

/// Methods advertised in `Access-Control-Allow-Methods`
const ALLOWED_METHODS: &str = "GET, OPTIONS";
/// Headers advertised in `Access-Control-Allow-Headers`
const ALLOWED_HEADERS: &str =
    "Content-Type, Authorization, X-Requested-With, Accept, Origin, X-Request-Id";
/// Preflight cache lifetime for the barcode endpoint
const BARCODE_PREFLIGHT_MAX_AGE: &str = "86400";

/// Query string accepted by the search endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    pub query: Option<String>,
    /// Upstream page size; unparseable values fall back to the default
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl SearchParams {
    fn required_query(&self) -> AppResult<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::missing_field(messages::QUERY_REQUIRED))
    }

    fn page_size(&self) -> Option<u32> {
        self.page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
    }
}

/// Food proxy routes implementation
pub struct FoodProxyRoutes;

impl FoodProxyRoutes {
    /// Create the food proxy routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let barcode = Router::new()
            .route("/api/food/barcode/:barcode", any(barcode_handler))
            .route("/api/food/barcode", any(missing_barcode_handler))
            .layer(
                ServiceBuilder::new()
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                        HeaderValue::from_static("true"),
                    ))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::CACHE_CONTROL,
                        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
                    ))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_MAX_AGE,
                        HeaderValue::from_static(BARCODE_PREFLIGHT_MAX_AGE),
                    )),
            );

        Router::new()
            .route("/api/food/search-openfoodfacts", any(open_food_facts_search_handler))
            .route("/api/food/search", any(usda_search_handler))
            .merge(barcode)
            .layer(
                ServiceBuilder::new()
                    .layer(overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                    .layer(overriding(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
                    .layer(overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
                    .layer(overriding(header::CONTENT_TYPE, "application/json")),
            )
            .with_state(resources)
    }
}

fn overriding(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// `Ok(Some(_))` answers a preflight, `Ok(None)` lets a GET through
fn preflight(method: &Method) -> AppResult<Option<Response>> {
    match *method {
        Method::OPTIONS => Ok(Some(StatusCode::OK.into_response())),
        Method::GET => Ok(None),
        _ => Err(AppError::method_not_allowed()),
    }
}

/// Run an upstream call under the server's request deadline
async fn within_deadline<T>(
    resources: &ServerResources,
    service: &str,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    let secs = resources.config.request_timeout_secs;
    tokio::time::timeout(Duration::from_secs(secs), call)
        .await
        .map_err(|_| AppError::upstream_unreachable(service, format!("no response within {secs}s")))?
}

fn search_params(params: Result<Query<SearchParams>, QueryRejection>) -> AppResult<SearchParams> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| {
            AppError::invalid_input(format!("Invalid query string: {}", rejection.body_text()))
        })
}

/// Return an upstream success body after checking it is JSON
fn passthrough(service: &str, body: Bytes) -> AppResult<Response> {
    serde_json::from_slice::<serde::de::IgnoredAny>(&body).map_err(|e| {
        AppError::serialization(format!("{service} returned a non-JSON body: {e}")).with_source(e)
    })?;
    Ok((StatusCode::OK, body).into_response())
}

async fn barcode_handler(
    State(resources): State<Arc<ServerResources>>,
    method: Method,
    barcode: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    if let Some(response) = preflight(&method)? {
        return Ok(response);
    }

    let Path(barcode) = barcode.map_err(|_| AppError::invalid_format(messages::INVALID_BARCODE))?;
    let body = within_deadline(
        &resources,
        service_names::OPEN_FOOD_FACTS,
        resources
            .open_food_facts
            .barcode_raw(barcode.trim(), &resources.shutdown),
    )
    .await?;
    passthrough(service_names::OPEN_FOOD_FACTS, body)
}

async fn missing_barcode_handler(method: Method) -> AppResult<Response> {
    if let Some(response) = preflight(&method)? {
        return Ok(response);
    }
    Err(AppError::missing_field(messages::BARCODE_REQUIRED))
}

async fn open_food_facts_search_handler(
    State(resources): State<Arc<ServerResources>>,
    method: Method,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Response> {
    if let Some(response) = preflight(&method)? {
        return Ok(response);
    }

    let params = search_params(params)?;
    let query = params.required_query()?;
    let body = within_deadline(
        &resources,
        service_names::OPEN_FOOD_FACTS,
        resources
            .open_food_facts
            .search_raw(query, params.page_size(), &resources.shutdown),
    )
    .await?;
    passthrough(service_names::OPEN_FOOD_FACTS, body)
}

async fn usda_search_handler(
    State(resources): State<Arc<ServerResources>>,
    method: Method,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Response> {
    if let Some(response) = preflight(&method)? {
        return Ok(response);
    }

    let params = search_params(params)?;
    let query = params.required_query()?;
    let options = FoodSearchOptions {
        page_size: params.page_size(),
        ..FoodSearchOptions::default()
    };
    let body = within_deadline(
        &resources,
        service_names::USDA,
        resources
            .usda
            .search_raw(query, &options, &resources.shutdown),
    )
    .await?;
    passthrough(service_names::USDA, body)
}
