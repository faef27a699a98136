// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the Axum request/response harness used by route tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
