// ABOUTME: Exercise commands for forage-cli
// ABOUTME: Listing (cached or paged), search, filter, lookups by id, body part, equipment and muscle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use crate::helpers::output::Output;
use anyhow::Result;
use forage::{
    cache::CacheProvider,
    cancellation::CancellationToken,
    external::{ExerciseDbClient, ExerciseFilters},
};
use serde_json::json;
use tracing::{info, warn};

/// Upstream name catalogs
#[derive(Debug, Clone, Copy)]
pub enum Catalog {
    BodyParts,
    Equipment,
    Muscles,
}

/// Full listing served through the cache
pub async fn cached_listing(
    client: &ExerciseDbClient,
    refresh: bool,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = if refresh {
        client.refresh_exercises(token).await?
    } else {
        client.all_exercises(token).await?
    };
    info!(count = exercises.len(), refresh, "Exercise listing loaded");
    output.print(&exercises)
}

/// One uncached page
pub async fn page(
    client: &ExerciseDbClient,
    offset: u32,
    limit: u32,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = client.list_exercises(offset, limit, token).await?;
    output.print(&exercises)
}

pub async fn search(
    client: &ExerciseDbClient,
    query: &str,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = client.search_exercises(query, token).await?;
    output.print(&exercises)
}

pub async fn filter(
    client: &ExerciseDbClient,
    filters: &ExerciseFilters,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = client.filter_exercises(filters, token).await?;
    output.print(&exercises)
}

pub async fn get(
    client: &ExerciseDbClient,
    id: &str,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercise = client.get_exercise(id, token).await?;
    output.print(&exercise)
}

pub async fn by_body_part(
    client: &ExerciseDbClient,
    body_part: &str,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = client.exercises_by_body_part(body_part, token).await?;
    output.print(&exercises)
}

pub async fn by_equipment(
    client: &ExerciseDbClient,
    equipment: &str,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = client.exercises_by_equipment(equipment, token).await?;
    output.print(&exercises)
}

pub async fn by_muscle(
    client: &ExerciseDbClient,
    muscle: &str,
    include_secondary: bool,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let exercises = client
        .exercises_by_muscle(muscle, include_secondary, token)
        .await?;
    output.print(&exercises)
}

/// Print the names in one catalog
pub async fn catalog(
    client: &ExerciseDbClient,
    kind: Catalog,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let names = match kind {
        Catalog::BodyParts => client.list_body_parts(token).await?,
        Catalog::Equipment => client.list_equipment(token).await?,
        Catalog::Muscles => client.list_muscles(token).await?,
    };
    output.print(&names)
}

/// Drop the cached listing and report whether the backend is still usable
pub async fn clear_cache(client: &ExerciseDbClient, output: Output) -> Result<()> {
    client.clear_cache().await?;
    let health = client.cache().health_check().await;
    if let Err(e) = &health {
        warn!(error = %e, "Cache backend failed its health check");
    }
    output.print(&json!({
        "cleared": true,
        "backend": client.cache().backend().to_string(),
        "healthy": health.is_ok(),
    }))
}
