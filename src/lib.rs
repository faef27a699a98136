// ABOUTME: Main library entry point for the forage food and exercise data gateway
// ABOUTME: Provider clients, transforms, snapshot cache, and CORS proxy endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

#![deny(unsafe_code)]

//! # Forage
//!
//! Data-acquisition layer between a fitness/nutrition client application and
//! the third-party providers it depends on: USDA `FoodData` Central, Open Food
//! Facts, and `ExerciseDB`.
//!
//! ## Architecture
//!
//! - **Transform**: pure mappings from provider payloads to [`models::CanonicalFood`]
//!   and [`models::CanonicalExercise`]
//! - **Cache**: time-expiring snapshot store for the exercise listing
//! - **External**: one client per provider; every call returns an
//!   [`errors::AppResult`] and accepts a [`cancellation::CancellationToken`]
//! - **Routes**: GET-only JSON proxy endpoints that add CORS headers and inject
//!   the server-held USDA API key
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use forage::cancellation::CancellationToken;
//! use forage::config::environment::ServerConfig;
//! use forage::external::usda_client::{FoodSearchOptions, UsdaClient};
//! use forage::utils::http_client::create_client;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let client = UsdaClient::new(config.usda.clone(), create_client(&config.http_client));
//!
//! let foods = client
//!     .search_foods("oatmeal", &FoodSearchOptions::default(), &CancellationToken::new())
//!     .await?;
//! println!("found {} foods", foods.len());
//! # Ok(())
//! # }
//! ```

/// Snapshot cache with pluggable backends
pub mod cache;

/// Cooperative cancellation for provider calls
pub mod cancellation;

/// Environment-driven configuration
pub mod config;

/// Upstream provider clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// Proxy and health routes
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Pure payload-to-record mappings
pub mod transform;

/// Shared utilities
pub mod utils;

pub use forage_core::{constants, errors, models};
