// ABOUTME: Forage CLI - command-line access to the food and exercise provider clients
// ABOUTME: Prints canonical JSON records; Ctrl+C cancels the in-flight upstream call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors
//!
//! Usage:
//! ```bash
//! # Search USDA FoodData Central
//! forage-cli food search "greek yogurt" --limit 5
//!
//! # Search Open Food Facts instead
//! forage-cli food search "granola" --source open-food-facts
//!
//! # Look up a product by barcode
//! forage-cli food barcode 3017620422003
//!
//! # Fetch one USDA food
//! forage-cli food details 171705
//!
//! # Check USDA connectivity
//! forage-cli food ping
//!
//! # Cached exercise listing, forcing a refresh
//! forage-cli exercise list --cached --refresh
//!
//! # Exercises for a muscle, including secondary targets
//! forage-cli exercise muscle biceps --include-secondary
//!
//! # Catalog of equipment names
//! forage-cli exercise catalog equipment
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use forage::{
    cache::Cache,
    cancellation::CancellationToken,
    config::ServerConfig,
    external::{ExerciseDbClient, ExerciseFilters, OpenFoodFactsClient, UsdaClient},
    logging,
    utils::http_client::create_client,
};
use helpers::output::Output;
use tokio::signal;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "forage-cli",
    about = "Forage food and exercise data CLI",
    long_about = "Query USDA FoodData Central, Open Food Facts and ExerciseDB, printing canonical JSON records."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print single-line JSON instead of pretty output
    #[arg(long, global = true)]
    compact: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Food lookups
    Food {
        #[command(subcommand)]
        action: FoodCommand,
    },

    /// Exercise lookups
    Exercise {
        #[command(subcommand)]
        action: ExerciseCommand,
    },
}

/// Food search backend
#[derive(Clone, Copy, ValueEnum)]
enum FoodSource {
    Usda,
    OpenFoodFacts,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FoodCommand {
    /// Search foods by free text
    Search {
        /// Search terms
        query: String,

        /// Provider to search
        #[arg(long, value_enum, default_value = "usda")]
        source: FoodSource,

        /// Maximum number of foods printed
        #[arg(long)]
        limit: Option<usize>,

        /// Upstream page size
        #[arg(long)]
        page_size: Option<u32>,

        /// Upstream page number (USDA only)
        #[arg(long)]
        page: Option<u32>,

        /// USDA data types, comma-separated (default: Foundation, SR Legacy, Survey (FNDDS))
        #[arg(long, value_delimiter = ',')]
        data_type: Vec<String>,
    },

    /// Fetch one USDA food by `FoodData` Central id
    Details {
        /// `FoodData` Central id
        fdc_id: u64,
    },

    /// Look up an Open Food Facts product by barcode
    Barcode {
        /// Numeric barcode
        barcode: String,
    },

    /// Check that USDA answers a search
    Ping,
}

/// Catalog listing kind
#[derive(Clone, Copy, ValueEnum)]
enum CatalogKind {
    BodyParts,
    Equipment,
    Muscles,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ExerciseCommand {
    /// List exercises
    List {
        /// Serve the full listing through the exercise cache
        #[arg(long)]
        cached: bool,

        /// Refetch the cached listing before printing
        #[arg(long, requires = "cached")]
        refresh: bool,

        /// Pagination offset (uncached listing only)
        #[arg(long, default_value = "0", conflicts_with = "cached")]
        offset: u32,

        /// Page size (uncached listing only)
        #[arg(long, default_value = "25", conflicts_with = "cached")]
        limit: u32,
    },

    /// Search exercises by name
    Search {
        /// Search terms
        query: String,
    },

    /// Filter exercises by muscles, equipment and body parts
    Filter {
        /// Free-text search applied with the filters
        #[arg(long)]
        search: Option<String>,

        /// Target muscles, comma-separated
        #[arg(long, value_delimiter = ',')]
        muscles: Vec<String>,

        /// Equipment, comma-separated
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Body parts, comma-separated
        #[arg(long, value_delimiter = ',')]
        body_parts: Vec<String>,

        /// Pagination offset
        #[arg(long)]
        offset: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Fetch one exercise by id
    Get {
        /// Upstream exercise id
        id: String,
    },

    /// Exercises for a body part
    BodyPart {
        /// Body part name
        name: String,
    },

    /// Exercises using a piece of equipment
    Equipment {
        /// Equipment name
        name: String,
    },

    /// Exercises targeting a muscle
    Muscle {
        /// Muscle name
        name: String,

        /// Include exercises where the muscle is a secondary target
        #[arg(long)]
        include_secondary: bool,
    },

    /// List catalog names known upstream
    Catalog {
        /// Which catalog to list
        #[arg(value_enum)]
        kind: CatalogKind,
    },

    /// Drop the cached exercise listing
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose)?;

    let config = ServerConfig::from_env()?;
    let http = create_client(&config.http_client);
    let output = Output::new(cli.compact);

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight request");
            interrupt.cancel();
        }
    });

    match cli.command {
        Command::Food { action } => {
            let usda = UsdaClient::new(config.usda, http.clone());
            let open_food_facts = OpenFoodFactsClient::new(config.open_food_facts, http);

            match action {
                FoodCommand::Search {
                    query,
                    source,
                    limit,
                    page_size,
                    page,
                    data_type,
                } => match source {
                    FoodSource::Usda => {
                        let options = commands::food::search_options(limit, page_size, page, data_type);
                        commands::food::search_usda(&usda, &query, &options, &token, output).await?;
                    }
                    FoodSource::OpenFoodFacts => {
                        commands::food::search_open_food_facts(
                            &open_food_facts,
                            &query,
                            page_size,
                            limit,
                            &token,
                            output,
                        )
                        .await?;
                    }
                },
                FoodCommand::Details { fdc_id } => {
                    commands::food::details(&usda, fdc_id, &token, output).await?;
                }
                FoodCommand::Barcode { barcode } => {
                    commands::food::barcode(&open_food_facts, &barcode, &token, output).await?;
                }
                FoodCommand::Ping => {
                    commands::food::ping(&usda, &token, output).await?;
                }
            }
        }
        Command::Exercise { action } => {
            let cache = Cache::new(&config.cache);
            let client = ExerciseDbClient::new(config.exercise_db, http, cache);

            match action {
                ExerciseCommand::List {
                    cached,
                    refresh,
                    offset,
                    limit,
                } => {
                    if cached {
                        commands::exercise::cached_listing(&client, refresh, &token, output)
                            .await?;
                    } else {
                        commands::exercise::page(&client, offset, limit, &token, output).await?;
                    }
                }
                ExerciseCommand::Search { query } => {
                    commands::exercise::search(&client, &query, &token, output).await?;
                }
                ExerciseCommand::Filter {
                    search,
                    muscles,
                    equipment,
                    body_parts,
                    offset,
                    limit,
                } => {
                    let filters = ExerciseFilters {
                        search,
                        muscles,
                        equipment,
                        body_parts,
                        offset,
                        limit,
                    };
                    commands::exercise::filter(&client, &filters, &token, output).await?;
                }
                ExerciseCommand::Get { id } => {
                    commands::exercise::get(&client, &id, &token, output).await?;
                }
                ExerciseCommand::BodyPart { name } => {
                    commands::exercise::by_body_part(&client, &name, &token, output).await?;
                }
                ExerciseCommand::Equipment { name } => {
                    commands::exercise::by_equipment(&client, &name, &token, output).await?;
                }
                ExerciseCommand::Muscle {
                    name,
                    include_secondary,
                } => {
                    commands::exercise::by_muscle(&client, &name, include_secondary, &token, output)
                        .await?;
                }
                ExerciseCommand::Catalog { kind } => {
                    let kind = match kind {
                        CatalogKind::BodyParts => commands::exercise::Catalog::BodyParts,
                        CatalogKind::Equipment => commands::exercise::Catalog::Equipment,
                        CatalogKind::Muscles => commands::exercise::Catalog::Muscles,
                    };
                    commands::exercise::catalog(&client, kind, &token, output).await?;
                }
                ExerciseCommand::ClearCache => {
                    commands::exercise::clear_cache(&client, output).await?;
                }
            }
        }
    }

    Ok(())
}
