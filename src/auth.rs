// ABOUTME: Auth gate for the insight pipeline
// ABOUTME: Resolves an opaque caller token before any paid upstream call is made
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Caller authentication
//!
//! The upstream completion call costs money and quota, so resolving a caller
//! identity is a hard precondition, not best-effort. Session issuance lives
//! in the platform; this module only extracts the opaque token and delegates
//! to a [`CallerResolver`] collaborator.

use crate::config::PlatformConfig;
use crate::errors::{AppError, AppResult};
use crate::models::CallerRef;
use crate::security::cookies::get_cookie_value;
use async_trait::async_trait;
use axum::http::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Caller-identity resolution collaborator
#[async_trait]
pub trait CallerResolver: Send + Sync {
    /// Resolve an opaque token to a caller identity, or `None` when invalid
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExternalService`] when the resolution service
    /// itself is unreachable.
    async fn resolve(&self, token: &str) -> AppResult<Option<CallerRef>>;
}

/// Extract the bearer token from the authorization header or auth cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("authorization").and_then(|h| h.to_str().ok()) {
        return Some(
            auth_header
                .strip_prefix("Bearer ")
                .unwrap_or(auth_header)
                .to_owned(),
        );
    }
    get_cookie_value(headers, "auth_token")
}

/// Authenticate a request, failing closed before any upstream call
///
/// # Errors
///
/// Returns [`AppError::AuthRequired`] when no token is supplied and
/// [`AppError::AuthInvalid`] when the resolver rejects it.
pub async fn authenticate(
    headers: &HeaderMap,
    resolver: &dyn CallerResolver,
) -> AppResult<CallerRef> {
    let token = extract_token(headers)
        .ok_or_else(|| AppError::auth_required("Missing authorization header or cookie"))?;

    resolver
        .resolve(&token)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Caller identity could not be resolved"))
}

/// Wire shape of the platform identity response
#[derive(Debug, Deserialize)]
struct PlatformIdentity {
    display_name: String,
}

/// Caller resolver backed by the platform's identity endpoint
pub struct HttpCallerResolver {
    config: PlatformConfig,
    http_client: Client,
}

impl HttpCallerResolver {
    /// Create a resolver from platform settings
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
impl CallerResolver for HttpCallerResolver {
    async fn resolve(&self, token: &str) -> AppResult<Option<CallerRef>> {
        let url = format!("{}/auth/me", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::external_service("platform auth", e.to_string()))?;

        // An explicit rejection means the token is invalid, not that the
        // service failed.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                "platform auth",
                format!("Identity request failed with HTTP {status}"),
            ));
        }

        let identity: PlatformIdentity = response.json().await.map_err(|e| {
            AppError::external_service("platform auth", format!("JSON parse error: {e}"))
        })?;

        Ok(Some(CallerRef {
            display_name: identity.display_name,
        }))
    }
}
