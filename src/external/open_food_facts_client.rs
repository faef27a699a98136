// ABOUTME: Open Food Facts API client for barcode lookups and English product search
// ABOUTME: Exposes transformed CanonicalFood results and raw JSON passthrough for the proxy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::upstream::{decode_json, send};
use crate::cancellation::CancellationToken;
use crate::constants::{messages, open_food_facts, service_names};
use crate::errors::{provider::ProviderError, AppError, AppResult};
use crate::models::CanonicalFood;
use crate::transform::open_food_facts::{transform_product, OffProductResponse, OffSearchResponse};
use bytes::Bytes;
use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

/// Open Food Facts client configuration
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    /// Base URL (default: <https://world.openfoodfacts.org>)
    pub base_url: String,
    /// Search page size when the caller does not choose one
    pub page_size: u32,
    /// User-Agent sent upstream, as Open Food Facts asks of API clients
    pub user_agent: String,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: open_food_facts::DEFAULT_BASE_URL.to_owned(),
            page_size: open_food_facts::DEFAULT_PAGE_SIZE,
            user_agent: open_food_facts::DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Whether `barcode` is a non-empty string of ASCII digits
#[must_use]
pub fn is_valid_barcode(barcode: &str) -> bool {
    !barcode.is_empty() && barcode.bytes().all(|b| b.is_ascii_digit())
}

/// Open Food Facts API client
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    config: OpenFoodFactsConfig,
    http: Client,
}

impl OpenFoodFactsClient {
    /// Create a new Open Food Facts client
    #[must_use]
    pub const fn new(config: OpenFoodFactsConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &OpenFoodFactsConfig {
        &self.config
    }

    fn barcode_request(&self, barcode: &str) -> RequestBuilder {
        self.http
            .get(format!(
                "{}{}/{barcode}.json",
                self.config.base_url,
                open_food_facts::PRODUCT_PATH
            ))
            .header(USER_AGENT, &self.config.user_agent)
    }

    fn search_request(&self, query: &str, page_size: u32) -> RequestBuilder {
        let page_size = page_size.max(1).to_string();
        self.http
            .get(format!(
                "{}{}",
                self.config.base_url,
                open_food_facts::SEARCH_PATH
            ))
            .header(USER_AGENT, &self.config.user_agent)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
                ("tagtype_0", "languages"),
                ("tag_contains_0", "contains"),
                ("tag_0", open_food_facts::LANGUAGE_TAG),
            ])
    }

    /// Look up a product by barcode and return the upstream JSON untouched
    ///
    /// # Errors
    ///
    /// Returns an invalid-format error for a non-numeric barcode, otherwise an
    /// error if the call is cancelled or the upstream request fails
    pub async fn barcode_raw(&self, barcode: &str, token: &CancellationToken) -> AppResult<Bytes> {
        if !is_valid_barcode(barcode) {
            return Err(AppError::invalid_format(messages::INVALID_BARCODE));
        }

        debug!(barcode, "Open Food Facts barcode lookup");
        send(
            service_names::OPEN_FOOD_FACTS,
            "Open Food Facts barcode lookup",
            self.barcode_request(barcode),
            token,
        )
        .await
    }

    /// Search English-tagged products and return the upstream JSON untouched
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty, the call is cancelled, or the
    /// upstream request fails
    pub async fn search_raw(
        &self,
        query: &str,
        page_size: Option<u32>,
        token: &CancellationToken,
    ) -> AppResult<Bytes> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::missing_field(messages::QUERY_REQUIRED));
        }

        let page_size = page_size.unwrap_or(self.config.page_size);
        debug!(query, page_size, "Open Food Facts product search");
        send(
            service_names::OPEN_FOOD_FACTS,
            "Open Food Facts product search",
            self.search_request(query, page_size),
            token,
        )
        .await
    }

    /// Look up a product by barcode
    ///
    /// # Errors
    ///
    /// Returns a not-found error when upstream reports no such product, plus
    /// the errors of [`barcode_raw`](Self::barcode_raw)
    pub async fn product_by_barcode(
        &self,
        barcode: &str,
        token: &CancellationToken,
    ) -> AppResult<CanonicalFood> {
        let body = self.barcode_raw(barcode, token).await?;
        let response: OffProductResponse = decode_json(service_names::OPEN_FOOD_FACTS, &body)?;

        let product = response.into_found().ok_or_else(|| {
            AppError::from(ProviderError::NotFound {
                provider: service_names::OPEN_FOOD_FACTS.to_owned(),
                resource: format!("barcode {barcode}"),
            })
        })?;

        Ok(transform_product(&product, barcode))
    }

    /// Search products by free text
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty, the call is cancelled, or the
    /// upstream request fails
    pub async fn search_products(
        &self,
        query: &str,
        page_size: Option<u32>,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalFood>> {
        let body = self.search_raw(query, page_size, token).await?;
        let response: OffSearchResponse = decode_json(service_names::OPEN_FOOD_FACTS, &body)?;

        Ok(response
            .products
            .iter()
            .filter(|product| product.code.as_deref().is_some_and(|c| !c.trim().is_empty()))
            .map(|product| transform_product(product, ""))
            .collect())
    }
}
