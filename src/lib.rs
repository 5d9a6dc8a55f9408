// ABOUTME: Main library entry point for the LexPrep insight server
// ABOUTME: Provides the AI insight generation pipeline behind a REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

#![deny(unsafe_code)]

//! # LexPrep Insight Server
//!
//! The AI insight generation service for the LexPrep education platform.
//! It turns a student's question, contribution, conversational context, or
//! search term into a structured explanation by calling an external
//! language-model completion service and decomposing its free-text reply.
//!
//! ## Architecture
//!
//! Each request runs a strictly sequential pipeline:
//! auth gate → request classifier → prompt builder → completion client →
//! (response decomposer, search analysis only) → result assembler.
//!
//! The page/UI layer, admin CRUD, session issuance, and the platform data
//! store are external collaborators reached through narrow trait interfaces;
//! this service owns no state that outlives a request.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lexprep_insight_server::config::ServerConfig;
//! use lexprep_insight_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Insight server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Caller authentication gate and identity resolution
pub mod auth;

/// Configuration management
pub mod config;

/// Focused dependency injection context
pub mod context;

/// Unified error handling with standard HTTP responses
pub mod errors;

/// Insight classification, prompt building, and reply decomposition
pub mod insights;

/// LLM provider abstraction for completion calls
pub mod llm;

/// Read-only projections of platform entities
pub mod models;

/// HTTP routes
pub mod routes;

/// Security helpers
pub mod security;
