// ABOUTME: Server binary for the LexPrep insight service
// ABOUTME: Loads configuration, wires resources, and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! LexPrep insight server binary

use anyhow::{Context, Result};
use clap::Parser;
use lexprep_insight_server::{
    auth::HttpCallerResolver,
    config::ServerConfig,
    context::ServerResources,
    insights::enrichment::HttpContextSearch,
    llm::HttpCompletionProvider,
    routes::{HealthRoutes, InsightRoutes},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// LexPrep insight server
#[derive(Debug, Parser)]
#[command(name = "lexprep-insight-server", version, about)]
struct Args {
    /// Override the HTTP listen port from LEXPREP_HTTP_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    let completion = Arc::new(
        HttpCompletionProvider::new(config.completion.clone())
            .context("Failed to build completion provider")?,
    );
    let caller_resolver = HttpCallerResolver::new(config.platform.clone())
        .context("Failed to build caller resolver")?;
    let context_search = HttpContextSearch::new(config.platform.clone())
        .context("Failed to build context search client")?;

    let http_port = config.http_port;
    let resources = ServerResources::new(config, completion, caller_resolver, context_search);

    let app = InsightRoutes::routes(resources)
        .merge(HealthRoutes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", http_port))
        .await
        .with_context(|| format!("Failed to bind port {http_port}"))?;

    info!("LexPrep insight server listening on port {http_port}");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
