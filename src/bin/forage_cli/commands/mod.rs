// ABOUTME: Re-exports command modules for forage-cli
// ABOUTME: Provides access to food and exercise lookup commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

pub mod exercise;
pub mod food;
