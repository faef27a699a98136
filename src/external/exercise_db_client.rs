// ABOUTME: ExerciseDB API client for exercise listings, search, filters and catalog lookups
// ABOUTME: The full listing is served from the snapshot cache when a fresh copy exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! `ExerciseDB` API Client
//!
//! Only [`ExerciseDbClient::all_exercises`] goes through the cache. Every other
//! call issues exactly one upstream request. The cache is best effort: read and
//! write failures are logged and the client carries on with upstream data.

use super::upstream::{decode_json, send};
use crate::cache::{factory::Cache, CacheKey, CacheProvider};
use crate::cancellation::CancellationToken;
use crate::constants::{cache, exercise_db, service_names};
use crate::errors::{provider::ProviderError, AppError, AppResult};
use crate::models::CanonicalExercise;
use crate::transform::exercise::{
    transform_exercise, transform_exercises, CatalogEntry, Envelope, ExerciseRecord,
};
use crate::transform::LenientList;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// `ExerciseDB` client configuration
#[derive(Debug, Clone)]
pub struct ExerciseDbConfig {
    /// Base URL including the API version prefix
    pub base_url: String,
    /// Optional key sent as `x-rapidapi-key`
    pub api_key: Option<String>,
    /// Number of exercises fetched for the cached listing
    pub list_limit: u32,
    /// Maximum age of the cached listing
    pub cache_max_age: Duration,
}

impl Default for ExerciseDbConfig {
    fn default() -> Self {
        Self {
            base_url: exercise_db::DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            list_limit: exercise_db::DEFAULT_LIST_LIMIT,
            cache_max_age: Duration::from_secs(cache::DEFAULT_EXERCISE_MAX_AGE_SECS),
        }
    }
}

/// Named filters for listing and filter queries
///
/// Only non-empty filters reach the upstream query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilters {
    /// Free-text search term
    pub search: Option<String>,
    /// Target muscles
    pub muscles: Vec<String>,
    /// Equipment names
    pub equipment: Vec<String>,
    /// Body parts
    pub body_parts: Vec<String>,
    /// Pagination offset
    pub offset: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl ExerciseFilters {
    /// Query pairs for the non-empty filters, in a stable order
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_owned()));
        }

        for (name, values) in [
            ("muscles", &self.muscles),
            ("equipment", &self.equipment),
            ("bodyParts", &self.body_parts),
        ] {
            let joined = join_non_empty(values);
            if !joined.is_empty() {
                pairs.push((name, joined));
            }
        }

        pairs
    }

    /// Whether no filter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }
}

fn join_non_empty(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// `ExerciseDB` API client
#[derive(Clone)]
pub struct ExerciseDbClient {
    config: ExerciseDbConfig,
    http: Client,
    cache: Cache,
}

impl ExerciseDbClient {
    /// Create a new client backed by `cache`
    #[must_use]
    pub const fn new(config: ExerciseDbConfig, http: Client, cache: Cache) -> Self {
        Self {
            config,
            http,
            cache,
        }
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &ExerciseDbConfig {
        &self.config
    }

    /// Snapshot cache used for the full listing
    #[must_use]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Build a URL from the base URL plus path segments, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            AppError::config(format!(
                "Invalid ExerciseDB base URL '{}': {e}",
                self.config.base_url
            ))
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                AppError::config(format!(
                    "ExerciseDB base URL '{}' cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url);
        match &self.config.api_key {
            Some(key) => request.header(exercise_db::API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        segments: &[&str],
        query: &[(&str, String)],
        token: &CancellationToken,
    ) -> AppResult<T> {
        let url = self.endpoint(segments)?;
        debug!(operation, url = %url, "ExerciseDB request");

        let body = send(
            service_names::EXERCISE_DB,
            operation,
            self.get(url).query(query),
            token,
        )
        .await?;

        let envelope: Envelope<T> = decode_json(service_names::EXERCISE_DB, &body)?;
        envelope.into_data().ok_or_else(|| {
            AppError::external_service(
                service_names::EXERCISE_DB,
                format!("{operation} reported failure"),
            )
        })
    }

    async fn fetch_exercises(
        &self,
        operation: &str,
        segments: &[&str],
        query: &[(&str, String)],
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let records: LenientList<ExerciseRecord> =
            self.fetch(operation, segments, query, token).await?;
        Ok(transform_exercises(records.into_inner()))
    }

    async fn fetch_catalog(
        &self,
        operation: &str,
        segment: &str,
        token: &CancellationToken,
    ) -> AppResult<Vec<String>> {
        let entries: LenientList<CatalogEntry> =
            self.fetch(operation, &[segment], &[], token).await?;
        Ok(entries
            .into_inner()
            .into_iter()
            .map(CatalogEntry::into_name)
            .collect())
    }

    async fn fetch_listing(&self, token: &CancellationToken) -> AppResult<Vec<CanonicalExercise>> {
        let filters = ExerciseFilters {
            offset: Some(0),
            limit: Some(self.config.list_limit),
            ..ExerciseFilters::default()
        };
        self.fetch_exercises(
            "ExerciseDB exercise listing",
            &["exercises"],
            &filters.to_query_pairs(),
            token,
        )
        .await
    }

    /// Store a fresh listing unless the caller has already given up on it
    async fn store_listing(
        &self,
        exercises: &[CanonicalExercise],
        token: &CancellationToken,
    ) -> AppResult<()> {
        if token.is_cancelled() {
            return Err(AppError::cancelled("ExerciseDB exercise listing"));
        }
        if let Err(e) = self.cache.put(&CacheKey::ExerciseList, exercises).await {
            warn!(error = %e, "Failed to store exercise listing in cache");
        }
        Ok(())
    }

    /// Full exercise listing, served from cache while it is fresh
    ///
    /// # Errors
    ///
    /// Returns an error if the cache has no fresh listing and the upstream
    /// fetch fails or is cancelled
    pub async fn all_exercises(
        &self,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        match self
            .cache
            .get(&CacheKey::ExerciseList, self.config.cache_max_age)
            .await
        {
            Ok(Some(exercises)) => {
                debug!(count = exercises.len(), "Exercise listing cache hit");
                return Ok(exercises);
            }
            Ok(None) => debug!("Exercise listing cache miss"),
            Err(e) => warn!(error = %e, "Exercise cache read failed, fetching from upstream"),
        }

        let exercises = self.fetch_listing(token).await?;
        self.store_listing(&exercises, token).await?;
        Ok(exercises)
    }

    /// Fetch the full listing from upstream and overwrite the cached copy
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream fetch fails or is cancelled; the
    /// cached copy is left untouched in that case
    pub async fn refresh_exercises(
        &self,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let exercises = self.fetch_listing(token).await?;
        self.store_listing(&exercises, token).await?;
        info!(count = exercises.len(), "Exercise listing refreshed");
        Ok(exercises)
    }

    /// Drop the cached listing
    ///
    /// # Errors
    ///
    /// Returns an error if the cache backend cannot be written
    pub async fn clear_cache(&self) -> AppResult<()> {
        self.cache.invalidate(&CacheKey::ExerciseList).await
    }

    /// One page of exercises, bypassing the cache
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails or is cancelled
    pub async fn list_exercises(
        &self,
        offset: u32,
        limit: u32,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let filters = ExerciseFilters {
            offset: Some(offset),
            limit: Some(limit),
            ..ExerciseFilters::default()
        };
        self.fetch_exercises(
            "ExerciseDB list exercises",
            &["exercises"],
            &filters.to_query_pairs(),
            token,
        )
        .await
    }

    /// Fuzzy search by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty or the upstream request fails
    pub async fn search_exercises(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::missing_field(crate::constants::messages::QUERY_REQUIRED));
        }
        self.fetch_exercises(
            "ExerciseDB search",
            &["exercises", "search"],
            &[("q", query.to_owned())],
            token,
        )
        .await
    }

    /// Exercises matching every non-empty filter
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails or is cancelled
    pub async fn filter_exercises(
        &self,
        filters: &ExerciseFilters,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        self.fetch_exercises(
            "ExerciseDB filter",
            &["exercises", "filter"],
            &filters.to_query_pairs(),
            token,
        )
        .await
    }

    /// One exercise by identifier
    ///
    /// # Errors
    ///
    /// Returns a not-found error (404) for an unknown identifier, otherwise an
    /// error if the upstream request fails or is cancelled
    pub async fn get_exercise(
        &self,
        exercise_id: &str,
        token: &CancellationToken,
    ) -> AppResult<CanonicalExercise> {
        let exercise_id = require("exercise id", exercise_id)?;
        let record: ExerciseRecord = self
            .fetch("ExerciseDB get exercise", &["exercises", exercise_id], &[], token)
            .await
            .map_err(|e| {
                if e.upstream_status == Some(404) {
                    ProviderError::NotFound {
                        provider: service_names::EXERCISE_DB.to_owned(),
                        resource: format!("exercise {exercise_id}"),
                    }
                    .into()
                } else {
                    e
                }
            })?;
        Ok(transform_exercise(record))
    }

    /// Exercises for one body part
    ///
    /// # Errors
    ///
    /// Returns an error if the body part is empty or the upstream request fails
    pub async fn exercises_by_body_part(
        &self,
        body_part: &str,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let body_part = require("body part", body_part)?;
        self.fetch_exercises(
            "ExerciseDB exercises by body part",
            &["bodyparts", body_part, "exercises"],
            &[],
            token,
        )
        .await
    }

    /// Exercises using one piece of equipment
    ///
    /// # Errors
    ///
    /// Returns an error if the equipment is empty or the upstream request fails
    pub async fn exercises_by_equipment(
        &self,
        equipment: &str,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let equipment = require("equipment", equipment)?;
        self.fetch_exercises(
            "ExerciseDB exercises by equipment",
            &["equipments", equipment, "exercises"],
            &[],
            token,
        )
        .await
    }

    /// Exercises targeting one muscle, optionally including secondary targets
    ///
    /// # Errors
    ///
    /// Returns an error if the muscle is empty or the upstream request fails
    pub async fn exercises_by_muscle(
        &self,
        muscle: &str,
        include_secondary: bool,
        token: &CancellationToken,
    ) -> AppResult<Vec<CanonicalExercise>> {
        let muscle = require("muscle", muscle)?;
        self.fetch_exercises(
            "ExerciseDB exercises by muscle",
            &["muscles", muscle, "exercises"],
            &[("includeSecondary", include_secondary.to_string())],
            token,
        )
        .await
    }

    /// Body part names known upstream
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails or is cancelled
    pub async fn list_body_parts(&self, token: &CancellationToken) -> AppResult<Vec<String>> {
        self.fetch_catalog("ExerciseDB body parts", "bodyparts", token)
            .await
    }

    /// Equipment names known upstream
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails or is cancelled
    pub async fn list_equipment(&self, token: &CancellationToken) -> AppResult<Vec<String>> {
        self.fetch_catalog("ExerciseDB equipment", "equipments", token)
            .await
    }

    /// Muscle names known upstream
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails or is cancelled
    pub async fn list_muscles(&self, token: &CancellationToken) -> AppResult<Vec<String>> {
        self.fetch_catalog("ExerciseDB muscles", "muscles", token)
            .await
    }
}

fn require<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::missing_field(format!("{field} is required")));
    }
    Ok(value)
}
