// ABOUTME: Cache factory for configuration-based backend selection
// ABOUTME: Dispatches the CacheProvider contract to the in-memory or file backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{
    file::FileCache, memory::InMemoryCache, CacheBackend, CacheConfig, CacheKey, CacheProvider,
};
use crate::errors::AppResult;
use crate::models::CanonicalExercise;
use std::time::Duration;

/// Unified cache handle
#[derive(Clone)]
pub enum Cache {
    /// Process-local LRU store
    Memory(InMemoryCache),
    /// JSON files under a directory
    File(FileCache),
}

impl Cache {
    /// Create the backend selected by `config`
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        match config.backend {
            CacheBackend::Memory => {
                tracing::info!(
                    "Initializing in-memory cache (max entries: {})",
                    config.max_entries
                );
                Self::Memory(InMemoryCache::new(config.max_entries))
            }
            CacheBackend::File => {
                tracing::info!(
                    "Initializing file cache at {}",
                    config.directory.display()
                );
                Self::File(FileCache::new(config.directory.clone()))
            }
        }
    }

    /// Name of the active backend
    #[must_use]
    pub const fn backend(&self) -> CacheBackend {
        match self {
            Self::Memory(_) => CacheBackend::Memory,
            Self::File(_) => CacheBackend::File,
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for Cache {
    async fn get(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<Vec<CanonicalExercise>>> {
        match self {
            Self::Memory(cache) => cache.get(key, max_age).await,
            Self::File(cache) => cache.get(key, max_age).await,
        }
    }

    async fn put(&self, key: &CacheKey, exercises: &[CanonicalExercise]) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.put(key, exercises).await,
            Self::File(cache) => cache.put(key, exercises).await,
        }
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.invalidate(key).await,
            Self::File(cache) => cache.invalidate(key).await,
        }
    }

    async fn clear_all(&self) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.clear_all().await,
            Self::File(cache) => cache.clear_all().await,
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.health_check().await,
            Self::File(cache) => cache.health_check().await,
        }
    }
}
