// ABOUTME: Liveness and readiness endpoints for the forage proxy
// ABOUTME: Readiness turns 503 once shutdown has begun so load balancers drain the instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! `/health` always answers while the process is up. `/ready` reports
//! `shutting_down` with 503 as soon as the server's root cancellation token
//! fires, which is also the moment in-flight upstream calls are abandoned.

use crate::constants::service_names;
use crate::server::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the liveness and readiness routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": service_names::FORAGE_SERVER,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> (StatusCode, Json<Value>) {
    let (status, label) = if resources.shutdown.is_cancelled() {
        (StatusCode::SERVICE_UNAVAILABLE, "shutting_down")
    } else {
        (StatusCode::OK, "ready")
    };

    (
        status,
        Json(json!({
            "status": label,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
