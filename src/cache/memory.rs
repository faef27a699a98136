// ABOUTME: In-memory snapshot cache with LRU eviction and max-age checks on read
// ABOUTME: Shared across clones through Arc<RwLock<LruCache>>
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{CacheEntry, CacheKey, CacheProvider};
use crate::errors::AppResult;
use crate::models::CanonicalExercise;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory snapshot cache
///
/// Clones share the same store. Concurrent writers to one slot resolve as
/// last-write-wins.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<LruCache<CacheKey, CacheEntry>>>,
}

impl InMemoryCache {
    /// Capacity used when the configuration asks for zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache holding at most `max_entries` slots
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Number of slots currently held, fresh or not
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the cache holds no slots
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<Vec<CanonicalExercise>>> {
        // LruCache::get is mutable (updates access order)
        let mut store = self.store.write().await;

        let fresh = match store.get(key) {
            Some(entry) if entry.is_fresh(max_age) => Some(entry.exercises.clone()),
            Some(_) => {
                store.pop(key);
                tracing::debug!(cache.key = %key, "Evicted stale cache entry");
                None
            }
            None => None,
        };
        drop(store);

        Ok(fresh)
    }

    async fn put(&self, key: &CacheKey, exercises: &[CanonicalExercise]) -> AppResult<()> {
        let entry = CacheEntry::new(exercises.to_vec());
        self.store.write().await.push(key.clone(), entry);
        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.store.write().await.pop(key);
        Ok(())
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.store.write().await.clear();
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
