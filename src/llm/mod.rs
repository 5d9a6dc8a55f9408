// ABOUTME: LLM provider abstraction for insight generation
// ABOUTME: Defines chat message types, the request builder, and the provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Completion provider abstraction
//!
//! The pipeline talks to the external text-completion service through the
//! [`CompletionProvider`] trait so tests can substitute a stub without
//! touching process-wide state. One synchronous call per request; no retry,
//! no backoff, no caching.

use crate::config::ModelTier;
use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible completion client
pub mod openai;

/// Fixed persona preambles for each insight kind
pub mod prompts;

pub use openai::HttpCompletionProvider;

/// Role of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instruction/persona framing
    System,
    /// Caller-supplied content
    User,
    /// Prior model output
    Assistant,
}

impl MessageRole {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One role-tagged turn in the ordered sequence sent upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Turn role
    pub role: MessageRole,
    /// Turn content
    pub content: String,
}

impl ChatMessage {
    /// Build a system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Build a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A completion request: ordered turns plus fixed generation parameters
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered message sequence; order is significant and preserved
    pub messages: Vec<ChatMessage>,
    /// Model capability tier
    pub model_tier: ModelTier,
    /// Sampling temperature
    pub temperature: f32,
    /// Bounded reply length in tokens, when requested
    pub max_tokens: Option<u32>,
    /// Whether the provider should emit structured JSON instead of prose
    pub json_response: bool,
}

impl ChatRequest {
    /// Create a request with the pipeline defaults (advanced tier, 0.7)
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model_tier: ModelTier::Advanced,
            temperature: 0.7,
            max_tokens: None,
            json_response: false,
        }
    }

    /// Select a model tier
    #[must_use]
    pub const fn with_tier(mut self, tier: ModelTier) -> Self {
        self.model_tier = tier;
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Bound the reply length
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request a JSON-formatted reply
    #[must_use]
    pub const fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// Token accounting returned by the provider, when available
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: i64,
    /// Tokens generated in the reply
    pub completion_tokens: i64,
}

/// A single completion reply
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Reply text
    pub content: String,
    /// Token usage, when the provider reports it
    pub usage: Option<TokenUsage>,
    /// Provider finish reason, when reported
    pub finish_reason: Option<String>,
}

/// External text-completion service
///
/// Implementations are stateless from the pipeline's perspective: each call
/// is independent, and a failure is propagated verbatim to the result
/// assembler.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one message sequence and await one synchronous reply
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::AppError::ExternalService`] when the provider
    /// call fails or times out.
    async fn complete(&self, request: &ChatRequest) -> AppResult<CompletionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_match_pipeline_constants() {
        let request = ChatRequest::new(vec![ChatMessage::user("hello")]);
        assert_eq!(request.model_tier, ModelTier::Advanced);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, None);
        assert!(!request.json_response);
    }

    #[test]
    fn builder_methods_compose() {
        let request = ChatRequest::new(vec![ChatMessage::system("persona")])
            .with_temperature(0.7)
            .with_max_tokens(500)
            .with_json_response();
        assert_eq!(request.max_tokens, Some(500));
        assert!(request.json_response);
    }

    #[test]
    fn message_constructors_tag_roles() {
        assert_eq!(ChatMessage::system("a").role, MessageRole::System);
        assert_eq!(ChatMessage::user("b").role, MessageRole::User);
        assert_eq!(ChatMessage::assistant("c").role, MessageRole::Assistant);
        assert_eq!(MessageRole::System.as_str(), "system");
    }
}
