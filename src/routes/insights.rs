// ABOUTME: Insight generation route handlers for the LexPrep platform
// ABOUTME: Runs the classify, build, complete, decompose, assemble pipeline per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Insight routes
//!
//! One endpoint serves all four insight kinds. Each request runs a strictly
//! sequential pipeline with a single await point on the completion call:
//! auth gate, request classifier, prompt builder, completion client, then
//! (for search analysis only) response decomposer, and result assembly.
//! Nothing outlives the request.

use crate::{
    auth,
    context::ServerResources,
    errors::AppError,
    insights::{self, enrichment, InsightRequest, ParsedAnalysis},
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Instant};
use tracing::info;

// ============================================================================
// Response Types
// ============================================================================

/// Success body for the question, contribution, and context kinds
#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    /// Raw completion text
    pub insights: String,
}

// The search-analysis kind serializes `ParsedAnalysis` directly:
// `{ analysis, related_topics, suggested_resources }`.

// ============================================================================
// Insight Routes
// ============================================================================

/// Insight routes handler
pub struct InsightRoutes;

impl InsightRoutes {
    /// Create all insight routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/insights", post(Self::generate_insight))
            .with_state(resources)
    }

    /// Generate an insight for one request
    ///
    /// The auth gate runs before classification so no paid upstream call is
    /// ever attempted for an unauthenticated caller.
    async fn generate_insight(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<Value>,
    ) -> Result<Response, AppError> {
        let caller = auth::authenticate(&headers, resources.caller_resolver.as_ref()).await?;

        let request = insights::classify(&payload)?;

        // Enrichment applies to search analysis only and degrades silently.
        let snippets = if let InsightRequest::SearchAnalysis { query } = &request {
            enrichment::fetch_snippets(resources.context_search.as_ref(), query).await
        } else {
            None
        };

        let built = insights::build_prompt(&request, Some(&caller), snippets.as_ref());

        let start_time = Instant::now();
        let reply = resources.completion.complete(&built.request).await?;
        let elapsed_ms = start_time.elapsed().as_millis();

        info!(
            "Completion finished in {elapsed_ms}ms ({} turns, suggestion_mode={})",
            built.request.messages.len(),
            built.suggestion_mode
        );

        Ok(assemble_response(&request, reply.content))
    }
}

/// Shape the final payload for the caller
///
/// The response field set is deterministic per kind even though the reply
/// text itself is not.
fn assemble_response(request: &InsightRequest, content: String) -> Response {
    if request.is_search_analysis() {
        let parsed: ParsedAnalysis = insights::decompose_analysis(&content);
        (StatusCode::OK, Json(parsed)).into_response()
    } else {
        (StatusCode::OK, Json(InsightResponse { insights: content })).into_response()
    }
}
