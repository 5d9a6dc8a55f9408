// ABOUTME: OpenAI-compatible chat-completions client over reqwest
// ABOUTME: One request per call, no retry, errors mapped to AppError::ExternalService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! HTTP completion provider
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. The client
//! owns no session state beyond reqwest's connection pool; each invocation
//! is independent and a failure is returned to the caller unmodified.

use crate::config::CompletionConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatRequest, CompletionProvider, CompletionResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const SERVICE_NAME: &str = "completion provider";

/// Wire shape of one outbound message
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Wire shape of the completion request body
#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: i64,
    completion_tokens: i64,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

/// OpenAI-compatible completion client
pub struct HttpCompletionProvider {
    config: CompletionConfig,
    http_client: Client,
}

impl HttpCompletionProvider {
    /// Create a client from completion-provider settings
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the HTTP client cannot be built.
    pub fn new(config: CompletionConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn build_body<'a>(&'a self, request: &'a ChatRequest) -> WireRequest<'a> {
        WireRequest {
            model: self.config.model_for_tier(request.model_tier),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_response
                .then(|| json!({"type": "json_object"})),
        }
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    async fn complete(&self, request: &ChatRequest) -> AppResult<CompletionResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!(
            "Requesting completion: {} messages, json={}",
            request.messages.len(),
            request.json_response
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("Completion request failed with HTTP {status}: {detail}"),
            ));
        }

        let wire: WireResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        let choice = wire.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service(SERVICE_NAME, "Reply contained no choices")
        })?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: wire.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
