// ABOUTME: Core types and constants for the forage food and exercise data gateway
// ABOUTME: Foundation crate with error handling, canonical records, and provider constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

#![deny(unsafe_code)]

//! # Forage Core
//!
//! Foundation crate providing shared types and constants for the forage data
//! gateway. The provider clients, the proxy routes and the command-line tool all
//! speak in terms of the records defined here.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Upstream endpoints, defaults, and lookup tables organized by provider
//! - **models**: Canonical food and exercise records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Upstream endpoints and default values organized by provider
pub mod constants;

/// Canonical food and exercise records
pub mod models;
