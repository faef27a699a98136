// ABOUTME: Cache-related constants for the exercise list snapshot
// ABOUTME: Storage key, default max age, and in-memory capacity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// Storage key of the exercise list snapshot
pub const EXERCISE_LIST_KEY: &str = "exercisedb_exercises_cache";

/// Default maximum age of the exercise list snapshot (24 hours)
pub const DEFAULT_EXERCISE_MAX_AGE_SECS: u64 = 86_400;

/// Default maximum entries for the in-memory cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 64;

/// Directory name used under the platform cache dir for file-backed snapshots
pub const CACHE_DIR_NAME: &str = "forage";
