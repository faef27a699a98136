// ABOUTME: HTTP server assembly for the food proxy: shared resources, middleware and lifecycle
// ABOUTME: Wires request ids and tracing, and cancels in-flight upstream calls on shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use crate::cancellation::CancellationToken;
use crate::config::ServerConfig;
use crate::external::{OpenFoodFactsClient, UsdaClient};
use crate::routes::{FoodProxyRoutes, HealthRoutes};
use crate::utils::http_client::create_client;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Resources shared by every request handler
#[derive(Debug, Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: ServerConfig,
    /// USDA client holding the server-side API key
    pub usda: UsdaClient,
    /// Open Food Facts client
    pub open_food_facts: OpenFoodFactsClient,
    /// Root token, cancelled when the server shuts down
    pub shutdown: CancellationToken,
}

impl ServerResources {
    /// Build clients from `config` over one shared HTTP connection pool
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let http = create_client(&config.http_client);
        Self {
            usda: UsdaClient::new(config.usda.clone(), http.clone()),
            open_food_facts: OpenFoodFactsClient::new(config.open_food_facts.clone(), http),
            shutdown: CancellationToken::new(),
            config,
        }
    }
}

/// Assemble the application router with its middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(FoodProxyRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Serve until Ctrl+C or SIGTERM, then cancel in-flight upstream calls
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = resources.config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {address}"))?;

    info!("Forage proxy listening on http://{address}");

    let shutdown = resources.shutdown.clone();
    let router = build_router(resources);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await
        .context("HTTP server error")?;

    info!("Forage proxy shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
