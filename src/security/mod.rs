// ABOUTME: Security helpers for the insight server
// ABOUTME: Cookie extraction used by the auth gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Security utilities

/// HTTP cookie helpers
pub mod cookies;
