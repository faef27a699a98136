// ABOUTME: Snapshot cache abstraction for upstream exercise listings
// ABOUTME: Pluggable backends (in-memory LRU, JSON files) behind one CacheProvider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// Cache factory for selecting a backend from configuration
pub mod factory;
/// JSON-file cache implementation
pub mod file;
/// In-memory cache implementation
pub mod memory;

pub use factory::Cache;

use crate::constants::cache::{CACHE_DIR_NAME, DEFAULT_CACHE_MAX_ENTRIES, EXERCISE_LIST_KEY};
use crate::errors::{AppError, AppResult};
use crate::models::CanonicalExercise;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// The cache is best-effort: callers treat every error as a miss and fall back
/// to a normal upstream fetch. Reads evict entries older than `max_age`, so an
/// expired snapshot is never returned twice.
///
/// # Examples
///
/// ```rust,no_run
/// use forage::cache::{memory::InMemoryCache, CacheKey, CacheProvider};
/// use std::time::Duration;
/// # async fn example() -> Result<(), forage::errors::AppError> {
/// let cache = InMemoryCache::new(16);
///
/// cache.put(&CacheKey::ExerciseList, &[]).await?;
/// let cached = cache
///     .get(&CacheKey::ExerciseList, Duration::from_secs(3600))
///     .await?;
/// assert_eq!(cached, Some(Vec::new()));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Read the snapshot stored under `key` if it is at most `max_age` old
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<Vec<CanonicalExercise>>>;

    /// Overwrite the snapshot stored under `key`, stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn put(&self, key: &CacheKey, exercises: &[CanonicalExercise]) -> AppResult<()>;

    /// Remove the snapshot stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Remove every snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn clear_all(&self) -> AppResult<()>;

    /// Verify the backend is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable
    async fn health_check(&self) -> AppResult<()>;
}

/// Cache slot identifier
///
/// Only [`CacheKey::ExerciseList`] is populated today; `Filtered` gives
/// per-filter listings their own slot without changing the provider contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Full exercise listing
    ExerciseList,
    /// Listing narrowed by a filter signature (e.g. `bodyParts=chest`)
    Filtered {
        /// Canonical filter signature
        filter: String,
    },
}

impl CacheKey {
    /// Storage-safe file stem for this key
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.to_string()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExerciseList => f.write_str(EXERCISE_LIST_KEY),
            Self::Filtered { filter } => write!(f, "{EXERCISE_LIST_KEY}:{filter}"),
        }
    }
}

/// Stored snapshot: `{exercises: [...], timestamp: epoch-ms}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Cached listing
    pub exercises: Vec<CanonicalExercise>,
    /// Write time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl CacheEntry {
    /// Stamp `exercises` with the current time
    #[must_use]
    pub fn new(exercises: Vec<CanonicalExercise>) -> Self {
        Self {
            exercises,
            timestamp: now_millis(),
        }
    }

    /// Whether this entry is at most `max_age` old at `now` (epoch ms)
    #[must_use]
    pub fn is_fresh_at(&self, max_age: Duration, now: i64) -> bool {
        let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(self.timestamp) <= max_age_ms
    }

    /// Whether this entry is at most `max_age` old right now
    #[must_use]
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.is_fresh_at(max_age, now_millis())
    }
}

/// Current time in milliseconds since the Unix epoch
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// Process-local LRU store
    #[default]
    Memory,
    /// One JSON file per key under the cache directory
    File,
}

impl FromStr for CacheBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "file" | "disk" => Ok(Self::File),
            other => Err(AppError::config(format!(
                "Unknown cache backend '{other}' (expected memory or file)"
            ))),
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::File => f.write_str("file"),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Backend to use
    pub backend: CacheBackend,
    /// Maximum number of slots (in-memory backend)
    pub max_entries: usize,
    /// Directory for the file backend
    pub directory: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            directory: default_cache_dir(),
        }
    }
}

/// Platform cache directory for snapshot files, falling back to the temp dir
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_DIR_NAME)
}
