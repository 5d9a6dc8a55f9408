// ABOUTME: Environment-variable configuration for the insight server
// ABOUTME: Loads HTTP, completion-provider, and platform collaborator settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Environment-based server configuration
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LEXPREP_HTTP_PORT` | HTTP listen port | `8081` |
//! | `LEXPREP_LLM_BASE_URL` | Completion provider base URL | `https://api.openai.com/v1` |
//! | `LEXPREP_LLM_API_KEY` | Completion provider API key | required |
//! | `LEXPREP_LLM_MODEL_ADVANCED` | Model name for the advanced tier | `gpt-4o` |
//! | `LEXPREP_LLM_MODEL_STANDARD` | Model name for the standard tier | `gpt-4o-mini` |
//! | `LEXPREP_LLM_TIMEOUT_SECS` | Completion request timeout | `60` |
//! | `LEXPREP_PLATFORM_BASE_URL` | LexPrep platform API (auth, search) | required |

use crate::errors::{AppError, AppResult};
use std::env;

/// Model capability tier requested from the completion provider
///
/// The insight pipeline uses [`ModelTier::Advanced`] uniformly; the standard
/// tier exists for cheaper background tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Highest-capability model
    Advanced,
    /// Cheaper general-purpose model
    Standard,
}

/// Completion provider settings
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL of the OpenAI-compatible completion API
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Model name used for [`ModelTier::Advanced`]
    pub model_advanced: String,
    /// Model name used for [`ModelTier::Standard`]
    pub model_standard: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CompletionConfig {
    /// Resolve the model name for a tier
    #[must_use]
    pub fn model_for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Advanced => &self.model_advanced,
            ModelTier::Standard => &self.model_standard,
        }
    }
}

/// LexPrep platform API settings (caller resolution and context search)
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the platform REST API
    pub base_url: String,
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Completion provider settings
    pub completion: CompletionConfig,
    /// Platform collaborator settings
    pub platform: PlatformConfig,
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when a required variable is missing or a
    /// numeric variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("LEXPREP_HTTP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::config(format!("LEXPREP_HTTP_PORT is not a valid port: {e}"))
            })?,
            Err(_) => 8081,
        };

        let timeout_secs = match env::var("LEXPREP_LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::config(format!("LEXPREP_LLM_TIMEOUT_SECS is not a number: {e}"))
            })?,
            Err(_) => 60,
        };

        let completion = CompletionConfig {
            base_url: env::var("LEXPREP_LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_owned()),
            api_key: env::var("LEXPREP_LLM_API_KEY").map_err(|_| {
                AppError::config("LEXPREP_LLM_API_KEY environment variable not set")
            })?,
            model_advanced: env::var("LEXPREP_LLM_MODEL_ADVANCED")
                .unwrap_or_else(|_| "gpt-4o".to_owned()),
            model_standard: env::var("LEXPREP_LLM_MODEL_STANDARD")
                .unwrap_or_else(|_| "gpt-4o-mini".to_owned()),
            timeout_secs,
        };

        let platform = PlatformConfig {
            base_url: env::var("LEXPREP_PLATFORM_BASE_URL").map_err(|_| {
                AppError::config("LEXPREP_PLATFORM_BASE_URL environment variable not set")
            })?,
        };

        Ok(Self {
            http_port,
            completion,
            platform,
        })
    }
}
