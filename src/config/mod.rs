// ABOUTME: Configuration management module for server and provider client settings
// ABOUTME: Loads environment-driven configuration into explicit, passed-in config structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors
//! Configuration module for Forage
//!
//! Every provider client is built from an explicit config struct, so there is
//! no module-level state for API keys, base URLs or cache keys. The
//! [`environment`] module assembles those structs from environment variables.

/// Environment and server configuration
pub mod environment;

pub use environment::ServerConfig;
