// ABOUTME: File-backed snapshot cache persisting each slot as a JSON document
// ABOUTME: Survives restarts; corrupt or stale files are removed and reported as misses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{CacheEntry, CacheKey, CacheProvider};
use crate::errors::{AppError, AppResult};
use crate::models::CanonicalExercise;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

/// Sequence for staging file names; concurrent writers to one key never share a file
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Snapshot cache storing `{exercises, timestamp}` documents under a directory
#[derive(Debug, Clone)]
pub struct FileCache {
    directory: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `directory`; the directory is created on first write
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory holding the snapshot files
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file backing `key`
    #[must_use]
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.directory.join(format!("{}.json", key.file_stem()))
    }

    fn staging_path_for(&self, key: &CacheKey) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.directory.join(format!(
            "{}.{}.{seq}.json.tmp",
            key.file_stem(),
            std::process::id()
        ))
    }

    async fn remove_if_present(path: &Path) -> AppResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for FileCache {
    async fn get(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<Vec<CanonicalExercise>>> {
        let path = self.path_for(key);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Discarding unreadable cache file");
                Self::remove_if_present(&path).await?;
                return Ok(None);
            }
        };

        if !entry.is_fresh(max_age) {
            debug!(cache.key = %key, "Evicted stale cache file");
            Self::remove_if_present(&path).await?;
            return Ok(None);
        }

        Ok(Some(entry.exercises))
    }

    async fn put(&self, key: &CacheKey, exercises: &[CanonicalExercise]) -> AppResult<()> {
        fs::create_dir_all(&self.directory).await?;

        let entry = CacheEntry::new(exercises.to_vec());
        let bytes = serde_json::to_vec(&entry)?;

        // Write then rename so readers never observe a half-written snapshot
        let path = self.path_for(key);
        let staging = self.staging_path_for(key);
        fs::write(&staging, bytes).await?;
        if let Err(e) = fs::rename(&staging, &path).await {
            Self::remove_if_present(&staging).await?;
            return Err(e.into());
        }

        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        Self::remove_if_present(&self.path_for(key)).await
    }

    async fn clear_all(&self) -> AppResult<()> {
        let mut entries = match fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Self::remove_if_present(&path).await?;
            }
        }

        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        fs::create_dir_all(&self.directory).await?;
        let metadata = fs::metadata(&self.directory).await?;
        if metadata.permissions().readonly() {
            return Err(AppError::storage(format!(
                "Cache directory {} is read-only",
                self.directory.display()
            )));
        }
        Ok(())
    }
}
