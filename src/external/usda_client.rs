// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Food search, detail lookup and liveness probe sharing one search request builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! USDA `FoodData` Central API Client
//!
//! Searches are restricted to the non-branded data types (`Foundation`,
//! `SR Legacy`, `Survey (FNDDS)`) unless the caller asks otherwise. The same
//! [`build_search_request`] backs both [`UsdaClient::search_foods`] and the
//! `/api/food/search` proxy endpoint.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use forage::cancellation::CancellationToken;
//! use forage::external::usda_client::{FoodSearchOptions, UsdaClient, UsdaClientConfig};
//! use forage::utils::http_client::{create_client, HttpClientConfig};
//!
//! # async fn example() -> Result<(), forage::errors::AppError> {
//! let client = UsdaClient::new(
//!     UsdaClientConfig::default(),
//!     create_client(&HttpClientConfig::default()),
//! );
//! let options = FoodSearchOptions {
//!     limit: Some(5),
//!     ..FoodSearchOptions::default()
//! };
//! let foods = client
//!     .search_foods("apple", &options, &CancellationToken::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::upstream::{decode_json, send};
use crate::cancellation::CancellationToken;
use crate::constants::{messages, service_names, usda};
use crate::errors::{provider::ProviderError, AppError, AppResult};
use crate::models::CanonicalFood;
use crate::transform::usda::{transform_usda_food, UsdaFood, UsdaSearchResponse};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API
    pub base_url: String,
    /// Upstream page size when the caller does not choose one
    pub page_size: u32,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: usda::DEMO_API_KEY.to_owned(),
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
            page_size: usda::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Food search options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodSearchOptions {
    /// Maximum number of foods returned after transformation (default: the requested page size)
    pub limit: Option<usize>,
    /// Data types to search (default: non-branded types)
    pub data_types: Option<Vec<String>>,
    /// Upstream page size, clamped to 1..=200 (default: configured page size)
    pub page_size: Option<u32>,
    /// Upstream page number, 1-based
    pub page_number: Option<u32>,
}

/// Page size actually requested from upstream, clamped to 1..=200
fn effective_page_size(config: &UsdaClientConfig, options: &FoodSearchOptions) -> u32 {
    options
        .page_size
        .unwrap_or(config.page_size)
        .clamp(1, usda::MAX_PAGE_SIZE)
}

/// Build the upstream `/foods/search` request
///
/// Results come back in USDA's default relevance order.
#[must_use]
pub fn build_search_request(
    http: &Client,
    config: &UsdaClientConfig,
    query: &str,
    options: &FoodSearchOptions,
) -> RequestBuilder {
    let data_types = options
        .data_types
        .as_ref()
        .filter(|types| !types.is_empty())
        .map_or_else(|| usda::DEFAULT_DATA_TYPES.join(","), |types| types.join(","));
    let page_size = effective_page_size(config, options);

    let mut params = vec![
        ("api_key", config.api_key.clone()),
        ("query", query.to_owned()),
        ("dataType", data_types),
        ("pageSize", page_size.to_string()),
    ];
    if let Some(page_number) = options.page_number {
        params.push(("pageNumber", page_number.to_string()));
    }

    http.get(format!("{}/foods/search", config.base_url))
        .query(&params)
}

/// USDA `FoodData` Central API Client
#[derive(Debug, Clone)]
pub struct UsdaClient {
    config: UsdaClientConfig,
    http: Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    #[must_use]
    pub const fn new(config: UsdaClientConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &UsdaClientConfig {
        &self.config
    }

    /// Search for foods by free text
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty, the call is cancelled, or the
    /// upstream request fails
    pub async fn search_foods(
        &self,
        query: &str,
        options: &FoodSearchOptions,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalFood>> {
        let body = self.search_raw(query, options, token).await?;
        let response: UsdaSearchResponse = decode_json(service_names::USDA, &body)?;

        let limit = options
            .limit
            .unwrap_or_else(|| effective_page_size(&self.config, options) as usize);
        let foods: Vec<CanonicalFood> = response
            .foods
            .iter()
            .take(limit)
            .map(transform_usda_food)
            .collect();

        debug!(
            query,
            total_hits = response.total_hits.unwrap_or_default(),
            returned = foods.len(),
            "USDA food search complete"
        );
        Ok(foods)
    }

    /// Run a search and return the upstream JSON untouched
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty, the call is cancelled, or the
    /// upstream request fails
    pub async fn search_raw(
        &self,
        query: &str,
        options: &FoodSearchOptions,
        token: &CancellationToken,
    ) -> AppResult<Bytes> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::missing_field(messages::QUERY_REQUIRED));
        }

        debug!(query, page_size = ?options.page_size, "USDA food search");
        let request = build_search_request(&self.http, &self.config, query, options);
        send(service_names::USDA, "USDA food search", request, token).await
    }

    /// Fetch one food by its `FoodData` Central identifier
    ///
    /// # Errors
    ///
    /// Returns a not-found error (404) when USDA has no such food, otherwise
    /// an error if the call is cancelled, fails, or the body is malformed
    pub async fn get_food_details(
        &self,
        fdc_id: u64,
        token: &CancellationToken,
    ) -> AppResult<CanonicalFood> {
        debug!(fdc_id, "USDA food details");
        let request = self
            .http
            .get(format!("{}/food/{fdc_id}", self.config.base_url))
            .query(&[("api_key", self.config.api_key.as_str())]);

        let body = send(service_names::USDA, "USDA food details", request, token)
            .await
            .map_err(|e| {
                if e.upstream_status == Some(404) {
                    ProviderError::NotFound {
                        provider: service_names::USDA.to_owned(),
                        resource: format!("food {fdc_id}"),
                    }
                    .into()
                } else {
                    e
                }
            })?;

        let food: UsdaFood = decode_json(service_names::USDA, &body)?;
        Ok(transform_usda_food(&food))
    }

    /// Liveness probe: a one-result search that reports whether USDA answered
    pub async fn check_connection(&self, token: &CancellationToken) -> bool {
        let options = FoodSearchOptions {
            page_size: Some(1),
            ..FoodSearchOptions::default()
        };
        match self.search_raw(usda::PROBE_QUERY, &options, token).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "USDA connection check failed");
                false
            }
        }
    }
}
