// ABOUTME: Integration tests for the JSON-file snapshot cache
// ABOUTME: Tests on-disk layout, persistence across instances, corruption recovery and clearing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use forage::cache::{
    file::FileCache, Cache, CacheBackend, CacheConfig, CacheEntry, CacheKey, CacheProvider,
};
use forage::models::CanonicalExercise;
use forage::transform::{transform_exercise, ExerciseRecord};
use std::time::Duration;
use tempfile::TempDir;

const HOUR: Duration = Duration::from_secs(3600);

fn exercise(id: &str) -> CanonicalExercise {
    transform_exercise(ExerciseRecord {
        exercise_id: id.to_owned(),
        name: format!("Exercise {id}"),
        target_muscles: vec!["glutes".to_owned()],
        body_parts: vec!["upper legs".to_owned()],
        ..ExerciseRecord::default()
    })
}

#[tokio::test]
async fn test_snapshot_survives_new_instance() -> Result<()> {
    let dir = TempDir::new()?;
    let listing = vec![exercise("e1"), exercise("e2")];

    FileCache::new(dir.path())
        .put(&CacheKey::ExerciseList, &listing)
        .await?;

    let reopened = FileCache::new(dir.path());
    assert_eq!(
        reopened.get(&CacheKey::ExerciseList, HOUR).await?,
        Some(listing)
    );
    Ok(())
}

#[tokio::test]
async fn test_file_holds_exercises_and_timestamp() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path());
    cache
        .put(&CacheKey::ExerciseList, &[exercise("e1")])
        .await?;

    let path = cache.path_for(&CacheKey::ExerciseList);
    assert_eq!(path, dir.path().join("exercisedb_exercises_cache.json"));

    let entry: CacheEntry = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(entry.exercises.len(), 1);
    assert!(entry.timestamp > 0);
    assert!(!path.with_extension("json.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_directory_is_a_miss() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path().join("not-created-yet"));

    assert_eq!(cache.get(&CacheKey::ExerciseList, HOUR).await?, None);
    cache.clear_all().await?;
    Ok(())
}

#[tokio::test]
async fn test_stale_file_is_removed() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path());
    cache
        .put(&CacheKey::ExerciseList, &[exercise("e1")])
        .await?;

    tokio::time::sleep(Duration::from_millis(25)).await;

    assert_eq!(
        cache
            .get(&CacheKey::ExerciseList, Duration::from_millis(5))
            .await?,
        None
    );
    assert!(!cache.path_for(&CacheKey::ExerciseList).exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_is_discarded() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path());
    let path = cache.path_for(&CacheKey::ExerciseList);
    std::fs::write(&path, b"{ not json")?;

    assert_eq!(cache.get(&CacheKey::ExerciseList, HOUR).await?, None);
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn test_filtered_key_gets_safe_file_name() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path());
    let key = CacheKey::Filtered {
        filter: "bodyParts=Upper Arms/../x".to_owned(),
    };

    cache.put(&key, &[exercise("e1")]).await?;

    let path = cache.path_for(&key);
    assert_eq!(path.parent(), Some(dir.path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name
        .trim_end_matches(".json")
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    assert!(cache.get(&key, HOUR).await?.is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_to_one_key_all_succeed() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path());

    let (ea, eb, ec, ed) = (
        [exercise("a")],
        [exercise("b")],
        [exercise("c")],
        [exercise("d")],
    );
    let (a, b, c, d) = tokio::join!(
        cache.put(&CacheKey::ExerciseList, &ea),
        cache.put(&CacheKey::ExerciseList, &eb),
        cache.put(&CacheKey::ExerciseList, &ec),
        cache.put(&CacheKey::ExerciseList, &ed),
    );
    a?;
    b?;
    c?;
    d?;

    let stored = cache.get(&CacheKey::ExerciseList, HOUR).await?;
    assert_eq!(stored.map(|listing| listing.len()), Some(1));

    let leftovers = std::fs::read_dir(dir.path())?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
    Ok(())
}

#[tokio::test]
async fn test_invalidate_and_clear_all() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = FileCache::new(dir.path());
    let other = CacheKey::Filtered {
        filter: "equipment=band".to_owned(),
    };
    std::fs::write(dir.path().join("notes.txt"), b"keep me")?;

    cache.put(&CacheKey::ExerciseList, &[exercise("e1")]).await?;
    cache.put(&other, &[exercise("e2")]).await?;

    cache.invalidate(&CacheKey::ExerciseList).await?;
    cache.invalidate(&CacheKey::ExerciseList).await?;
    assert_eq!(cache.get(&CacheKey::ExerciseList, HOUR).await?, None);
    assert!(cache.get(&other, HOUR).await?.is_some());

    cache.clear_all().await?;
    assert_eq!(cache.get(&other, HOUR).await?, None);
    assert!(dir.path().join("notes.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_health_check_creates_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let nested = dir.path().join("a").join("b");
    let cache = FileCache::new(&nested);

    cache.health_check().await?;
    assert!(nested.is_dir());
    Ok(())
}

#[tokio::test]
async fn test_factory_selects_file_backend() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = Cache::new(&CacheConfig {
        backend: CacheBackend::File,
        directory: dir.path().to_path_buf(),
        ..CacheConfig::default()
    });
    assert_eq!(cache.backend(), CacheBackend::File);

    cache.put(&CacheKey::ExerciseList, &[exercise("e1")]).await?;
    assert!(dir.path().join("exercisedb_exercises_cache.json").exists());
    Ok(())
}
