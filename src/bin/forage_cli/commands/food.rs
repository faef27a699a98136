// ABOUTME: Food commands for forage-cli
// ABOUTME: USDA and Open Food Facts search, USDA details, barcode lookup and USDA ping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use crate::helpers::output::Output;
use anyhow::{bail, Result};
use forage::{
    cancellation::CancellationToken,
    constants::service_names,
    external::{FoodSearchOptions, OpenFoodFactsClient, UsdaClient},
};
use serde_json::json;
use tracing::info;

/// Collect USDA search flags into request options
pub fn search_options(
    limit: Option<usize>,
    page_size: Option<u32>,
    page_number: Option<u32>,
    data_types: Vec<String>,
) -> FoodSearchOptions {
    FoodSearchOptions {
        limit,
        data_types: (!data_types.is_empty()).then_some(data_types),
        page_size,
        page_number,
    }
}

/// Search USDA `FoodData` Central
pub async fn search_usda(
    client: &UsdaClient,
    query: &str,
    options: &FoodSearchOptions,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let foods = client.search_foods(query, options, token).await?;
    info!(count = foods.len(), "USDA search returned foods");
    output.print(&foods)
}

/// Search Open Food Facts
pub async fn search_open_food_facts(
    client: &OpenFoodFactsClient,
    query: &str,
    page_size: Option<u32>,
    limit: Option<usize>,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let mut foods = client.search_products(query, page_size, token).await?;
    if let Some(limit) = limit {
        foods.truncate(limit);
    }
    output.print(&foods)
}

/// Fetch one USDA food
pub async fn details(
    client: &UsdaClient,
    fdc_id: u64,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let food = client.get_food_details(fdc_id, token).await?;
    output.print(&food)
}

/// Look up a product by barcode
pub async fn barcode(
    client: &OpenFoodFactsClient,
    barcode: &str,
    token: &CancellationToken,
    output: Output,
) -> Result<()> {
    let food = client.product_by_barcode(barcode.trim(), token).await?;
    output.print(&food)
}

/// Report whether USDA answers; fails the process when it does not
pub async fn ping(client: &UsdaClient, token: &CancellationToken, output: Output) -> Result<()> {
    let reachable = client.check_connection(token).await;
    output.print(&json!({
        "service": service_names::USDA,
        "reachable": reachable,
    }))?;

    if !reachable {
        bail!("{} is not reachable", service_names::USDA);
    }
    Ok(())
}
