// ABOUTME: Configuration module organization for the insight server
// ABOUTME: Exposes environment-based server and completion-provider settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Configuration management
//!
//! Configuration is environment-only: every tunable is read once at startup
//! by [`environment::ServerConfig::from_env`] and carried in
//! [`crate::context::ServerResources`].

/// Environment-based configuration loading
pub mod environment;

pub use environment::{CompletionConfig, ModelTier, PlatformConfig, ServerConfig};
