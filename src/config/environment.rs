// ABOUTME: Environment-based configuration for the proxy server and provider clients
// ABOUTME: Parses ports, upstream URLs, API keys, cache settings and HTTP client timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! Environment configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `HTTP_PORT` | `8081` |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//! | `USDA_API_KEY` | `DEMO_KEY` (rate limited) |
//! | `USDA_BASE_URL` | `https://api.nal.usda.gov/fdc/v1` |
//! | `USDA_PAGE_SIZE` | `25` |
//! | `OPEN_FOOD_FACTS_BASE_URL` | `https://world.openfoodfacts.org` |
//! | `OPEN_FOOD_FACTS_PAGE_SIZE` | `50` |
//! | `OPEN_FOOD_FACTS_USER_AGENT` | `forage/<version>` |
//! | `EXERCISEDB_BASE_URL` | `https://exercisedb-api.vercel.app/api/v1` |
//! | `EXERCISEDB_API_KEY` | unset |
//! | `EXERCISEDB_LIST_LIMIT` | `100` |
//! | `EXERCISE_CACHE_MAX_AGE_SECS` | `86400` |
//! | `CACHE_BACKEND` | `memory` |
//! | `CACHE_DIR` | platform cache dir + `/forage` |
//! | `CACHE_MAX_ENTRIES` | `64` |
//! | `HTTP_CLIENT_TIMEOUT_SECS` | `30` |
//! | `HTTP_CLIENT_CONNECT_TIMEOUT_SECS` | `10` |

use crate::cache::{CacheBackend, CacheConfig};
use crate::constants::{exercise_db, open_food_facts, usda};
use crate::external::exercise_db_client::ExerciseDbConfig;
use crate::external::open_food_facts_client::OpenFoodFactsConfig;
use crate::external::usda_client::UsdaClientConfig;
use crate::utils::http_client::HttpClientConfig;
use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default HTTP port for the proxy server
pub const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default per-request timeout enforced by the server
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Timeout applied to every proxied request
    pub request_timeout_secs: u64,
    /// USDA `FoodData` Central client
    pub usda: UsdaClientConfig,
    /// Open Food Facts client
    pub open_food_facts: OpenFoodFactsConfig,
    /// `ExerciseDB` client
    pub exercise_db: ExerciseDbConfig,
    /// Snapshot cache
    pub cache: CacheConfig,
    /// Outbound HTTP client
    pub http_client: HttpClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            usda: UsdaClientConfig::default(),
            open_food_facts: OpenFoodFactsConfig::default(),
            exercise_db: ExerciseDbConfig::default(),
            cache: CacheConfig::default(),
            http_client: HttpClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let api_key = match env::var("USDA_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                warn!(
                    "USDA_API_KEY not set, falling back to {} (strict rate limits apply)",
                    usda::DEMO_API_KEY
                );
                usda::DEMO_API_KEY.to_owned()
            }
        };

        let config = Self {
            host: env_var_or("HOST", DEFAULT_HOST),
            http_port: parse_env("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,

            usda: UsdaClientConfig {
                api_key,
                base_url: env_var_or("USDA_BASE_URL", usda::DEFAULT_BASE_URL),
                page_size: parse_env("USDA_PAGE_SIZE", usda::DEFAULT_PAGE_SIZE)?,
            },

            open_food_facts: OpenFoodFactsConfig {
                base_url: env_var_or("OPEN_FOOD_FACTS_BASE_URL", open_food_facts::DEFAULT_BASE_URL),
                page_size: parse_env("OPEN_FOOD_FACTS_PAGE_SIZE", open_food_facts::DEFAULT_PAGE_SIZE)?,
                user_agent: env_var_or(
                    "OPEN_FOOD_FACTS_USER_AGENT",
                    open_food_facts::DEFAULT_USER_AGENT,
                ),
            },

            exercise_db: ExerciseDbConfig {
                base_url: env_var_or("EXERCISEDB_BASE_URL", exercise_db::DEFAULT_BASE_URL),
                api_key: env::var("EXERCISEDB_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                list_limit: parse_env("EXERCISEDB_LIST_LIMIT", exercise_db::DEFAULT_LIST_LIMIT)?,
                cache_max_age: Duration::from_secs(parse_env(
                    "EXERCISE_CACHE_MAX_AGE_SECS",
                    crate::constants::cache::DEFAULT_EXERCISE_MAX_AGE_SECS,
                )?),
            },

            cache: CacheConfig {
                backend: parse_env("CACHE_BACKEND", CacheBackend::default())?,
                max_entries: parse_env(
                    "CACHE_MAX_ENTRIES",
                    crate::constants::cache::DEFAULT_CACHE_MAX_ENTRIES,
                )?,
                directory: env::var("CACHE_DIR")
                    .map_or_else(|_| crate::cache::default_cache_dir(), PathBuf::from),
            },

            http_client: HttpClientConfig {
                timeout_secs: parse_env(
                    "HTTP_CLIENT_TIMEOUT_SECS",
                    HttpClientConfig::default().timeout_secs,
                )?,
                connect_timeout_secs: parse_env(
                    "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                    HttpClientConfig::default().connect_timeout_secs,
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Reject values that parse but cannot work
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.usda.page_size == 0 || self.usda.page_size > usda::MAX_PAGE_SIZE {
            anyhow::bail!(
                "USDA_PAGE_SIZE must be between 1 and {}, got {}",
                usda::MAX_PAGE_SIZE,
                self.usda.page_size
            );
        }
        if self.open_food_facts.page_size == 0 {
            anyhow::bail!("OPEN_FOOD_FACTS_PAGE_SIZE must be at least 1");
        }
        if self.exercise_db.list_limit == 0 {
            anyhow::bail!("EXERCISEDB_LIST_LIMIT must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Human-readable summary without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Forage Server Configuration:\n\
             - Bind: {}\n\
             - Request Timeout: {}s\n\
             - USDA: {} (key: {}, page size: {})\n\
             - Open Food Facts: {} (page size: {})\n\
             - ExerciseDB: {} (key: {}, list limit: {}, cache max age: {}s)\n\
             - Cache: {} ({} entries, dir: {})\n\
             - HTTP Client: {}s timeout, {}s connect",
            self.bind_address(),
            self.request_timeout_secs,
            self.usda.base_url,
            if self.usda.api_key == usda::DEMO_API_KEY {
                "demo"
            } else {
                "configured"
            },
            self.usda.page_size,
            self.open_food_facts.base_url,
            self.open_food_facts.page_size,
            self.exercise_db.base_url,
            if self.exercise_db.api_key.is_some() {
                "configured"
            } else {
                "none"
            },
            self.exercise_db.list_limit,
            self.exercise_db.cache_max_age.as_secs(),
            self.cache.backend,
            self.cache.max_entries,
            self.cache.directory.display(),
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Read `key`, falling back to `default` when unset
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse `key` into `T`, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: '{raw}'")),
        Err(_) => Ok(default),
    }
}
