// ABOUTME: Route module organization for the insight server HTTP endpoints
// ABOUTME: Centralized route definitions with thin handlers delegating to the pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Route modules
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the pipeline modules.

/// Health check and system status routes
pub mod health;

/// Insight generation routes
pub mod insights;

pub use health::HealthRoutes;
pub use insights::InsightRoutes;
