// ABOUTME: Dependency injection context shared by all route handlers
// ABOUTME: Holds the completion provider and platform collaborators behind trait objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Server resources
//!
//! Every collaborator the pipeline depends on is constructed explicitly in
//! the binary and injected here, so tests can substitute stubs without
//! touching process-wide state. No resource holds per-request state.

use crate::auth::CallerResolver;
use crate::config::ServerConfig;
use crate::insights::enrichment::ContextSearch;
use crate::llm::CompletionProvider;
use std::sync::Arc;

/// Shared, request-independent server dependencies
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// External completion provider
    pub completion: Arc<dyn CompletionProvider>,
    /// Caller-identity resolution collaborator
    pub caller_resolver: Arc<dyn CallerResolver>,
    /// Keyword/context search collaborator for prompt enrichment
    pub context_search: Arc<dyn ContextSearch>,
}

impl ServerResources {
    /// Bundle resources for injection into the router state
    #[must_use]
    pub fn new(
        config: ServerConfig,
        completion: Arc<dyn CompletionProvider>,
        caller_resolver: Arc<dyn CallerResolver>,
        context_search: Arc<dyn ContextSearch>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            completion,
            caller_resolver,
            context_search,
        })
    }
}
