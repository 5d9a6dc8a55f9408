// ABOUTME: Optional prompt enrichment from the platform's keyword search
// ABOUTME: Failures degrade silently to an un-enriched prompt, never surfaced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Context enrichment for search-term analysis
//!
//! Before building the search-analysis prompt, the pipeline may ask the
//! platform's lightweight keyword search for up to one related past-question
//! snippet and one related course snippet. The collaborator's absence or
//! failure must not fail the request: [`fetch_snippets`] recovers locally
//! and logs at `warn`.

use crate::config::PlatformConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Snippets returned by the keyword search collaborator
#[derive(Debug, Clone, Default)]
pub struct SearchSnippets {
    /// One related past-question snippet, if any
    pub question: Option<String>,
    /// One related course snippet, if any
    pub course: Option<String>,
}

impl SearchSnippets {
    /// Render the snippets as a context turn, or `None` when empty
    #[must_use]
    pub fn context_block(&self) -> Option<String> {
        if self.question.is_none() && self.course.is_none() {
            return None;
        }

        let mut block = String::from("Platform context for this search:\n");
        if let Some(question) = &self.question {
            let _ = writeln!(block, "Related past question: {question}");
        }
        if let Some(course) = &self.course {
            let _ = writeln!(block, "Related course: {course}");
        }
        Some(block)
    }
}

/// Lightweight keyword/context search collaborator
#[async_trait]
pub trait ContextSearch: Send + Sync {
    /// Look up snippets related to a search term
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExternalService`] when the lookup fails; callers
    /// recover via [`fetch_snippets`].
    async fn related_snippets(&self, query: &str) -> AppResult<SearchSnippets>;
}

/// Fetch enrichment snippets, degrading silently on failure
pub async fn fetch_snippets(search: &dyn ContextSearch, query: &str) -> Option<SearchSnippets> {
    match search.related_snippets(query).await {
        Ok(snippets) => Some(snippets),
        Err(e) => {
            warn!("Context enrichment failed, continuing without it: {e}");
            None
        }
    }
}

/// Wire shape of the platform search response
#[derive(Debug, Deserialize)]
struct PlatformSearchResponse {
    #[serde(default)]
    questions: Vec<PlatformQuestionHit>,
    #[serde(default)]
    courses: Vec<PlatformCourseHit>,
}

#[derive(Debug, Deserialize)]
struct PlatformQuestionHit {
    text: String,
}

#[derive(Debug, Deserialize)]
struct PlatformCourseHit {
    name: String,
}

/// HTTP implementation backed by the platform's search endpoint
pub struct HttpContextSearch {
    config: PlatformConfig,
    http_client: Client,
}

impl HttpContextSearch {
    /// Create a search client from platform settings
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the HTTP client cannot be built.
    pub fn new(config: PlatformConfig) -> AppResult<Arc<Self>> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Arc::new(Self {
            config,
            http_client,
        }))
    }
}

#[async_trait]
impl ContextSearch for HttpContextSearch {
    async fn related_snippets(&self, query: &str) -> AppResult<SearchSnippets> {
        let url = format!("{}/search", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AppError::external_service("platform search", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                "platform search",
                format!("Search request failed with HTTP {status}"),
            ));
        }

        let hits: PlatformSearchResponse = response.json().await.map_err(|e| {
            AppError::external_service("platform search", format!("JSON parse error: {e}"))
        })?;

        Ok(SearchSnippets {
            question: hits.questions.into_iter().next().map(|q| q.text),
            course: hits.courses.into_iter().next().map(|c| c.name),
        })
    }
}
