// ABOUTME: HTTP route modules for the food proxy endpoints and health checks
// ABOUTME: Each route group exposes a unit struct with a routes() constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

/// Food proxy endpoints (Open Food Facts, USDA)
pub mod food;
/// Health and readiness endpoints
pub mod health;

pub use food::FoodProxyRoutes;
pub use health::HealthRoutes;
