// ABOUTME: Shared test utilities for insight server integration tests
// ABOUTME: Provides stub collaborators and a router builder with injected resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, dead_code)]

//! Shared test utilities for `lexprep_insight_server`
//!
//! Every collaborator the pipeline depends on is injectable, so integration
//! tests run the real router against in-process stubs. The completion stub
//! counts calls so tests can assert that failing requests never reach the
//! paid upstream and that upstream failures are not retried.

use async_trait::async_trait;
use axum::Router;
use lexprep_insight_server::{
    auth::CallerResolver,
    config::{CompletionConfig, PlatformConfig, ServerConfig},
    context::ServerResources,
    errors::{AppError, AppResult},
    insights::enrichment::{ContextSearch, SearchSnippets},
    llm::{ChatRequest, CompletionProvider, CompletionResponse},
    models::CallerRef,
    routes::InsightRoutes,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// Completion stub returning a canned reply (or a failure) and counting calls
pub struct StubCompletion {
    reply: Option<String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl StubCompletion {
    /// Stub that replies with the given text
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_owned()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Stub whose every call fails like an unreachable provider
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Number of completion calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any call was made
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, request: &ChatRequest) -> AppResult<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        self.reply.as_ref().map_or_else(
            || {
                Err(AppError::external_service(
                    "completion provider",
                    "Completion request failed with HTTP 503",
                ))
            },
            |reply| {
                Ok(CompletionResponse {
                    content: reply.clone(),
                    usage: None,
                    finish_reason: Some("stop".to_owned()),
                })
            },
        )
    }
}

/// Resolver stub accepting any token as a fixed test caller
pub struct StubResolver {
    caller: Option<CallerRef>,
}

impl StubResolver {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            caller: Some(CallerRef {
                display_name: "Test Student".to_owned(),
            }),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self { caller: None })
    }
}

#[async_trait]
impl CallerResolver for StubResolver {
    async fn resolve(&self, _token: &str) -> AppResult<Option<CallerRef>> {
        Ok(self.caller.clone())
    }
}

/// Context-search stub: empty snippets, canned snippets, or failure
pub enum StubSearch {
    Empty,
    WithSnippets(SearchSnippets),
    Failing,
}

#[async_trait]
impl ContextSearch for StubSearch {
    async fn related_snippets(&self, _query: &str) -> AppResult<SearchSnippets> {
        match self {
            Self::Empty => Ok(SearchSnippets::default()),
            Self::WithSnippets(snippets) => Ok(SearchSnippets {
                question: snippets.question.clone(),
                course: snippets.course.clone(),
            }),
            Self::Failing => Err(AppError::external_service("platform search", "down")),
        }
    }
}

/// Configuration with test placeholders (nothing reads the network)
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        completion: CompletionConfig {
            base_url: "https://llm.test/v1".to_owned(),
            api_key: "test-key".to_owned(),
            model_advanced: "adv-model".to_owned(),
            model_standard: "std-model".to_owned(),
            timeout_secs: 5,
        },
        platform: PlatformConfig {
            base_url: "https://platform.test/api".to_owned(),
        },
    }
}

/// Build the insight router with injected stubs
pub fn test_router(
    completion: Arc<StubCompletion>,
    resolver: Arc<StubResolver>,
    search: StubSearch,
) -> Router {
    let resources = ServerResources::new(test_config(), completion, resolver, Arc::new(search));
    InsightRoutes::routes(resources)
}
