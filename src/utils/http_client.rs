// ABOUTME: Shared outbound HTTP client construction with connection pooling and timeouts
// ABOUTME: Clients are built from HttpClientConfig and cloned into every provider client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Default request timeout for upstream calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout for upstream calls
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Outbound HTTP client settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Create an HTTP client from `config`
///
/// `reqwest::Client` is reference counted, so clones share one connection pool.
///
/// Falls back to a default client if the builder fails, which only happens
/// when the TLS backend cannot initialize.
#[must_use]
pub fn create_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}
