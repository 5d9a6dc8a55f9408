// ABOUTME: Health check route for load balancers and monitoring
// ABOUTME: Reports service name, version, and liveness status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Health routes

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    #[must_use]
    pub fn routes() -> Router {
        Router::new().route("/api/health", get(Self::health))
    }

    async fn health() -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
    }
}
