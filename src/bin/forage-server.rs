// ABOUTME: Server binary for the Forage food proxy
// ABOUTME: Loads environment configuration, initializes logging and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! # Forage Proxy Server Binary
//!
//! Serves the browser-facing food proxy endpoints plus `/health` and `/ready`.

use anyhow::Result;
use clap::Parser;
use forage::{config::ServerConfig, logging, server};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "forage-server")]
#[command(about = "Forage - CORS proxy for Open Food Facts and USDA FoodData Central")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!("Starting Forage proxy server");
    info!("{}", config.summary());

    let resources = Arc::new(server::ServerResources::new(config));
    server::run(resources).await
}
