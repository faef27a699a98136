// ABOUTME: Utility modules shared by the server, CLI and provider clients
// ABOUTME: Currently holds outbound HTTP client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// HTTP client configuration and helpers
pub mod http_client;
