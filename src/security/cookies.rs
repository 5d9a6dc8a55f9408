// ABOUTME: HTTP cookie helpers for session token extraction
// ABOUTME: The browser frontend carries its session token in an auth_token cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Cookie utilities
//!
//! Session issuance lives in the platform; this service only needs to read
//! the session token the frontend already carries.

use axum::http::{header, HeaderMap};

/// Extract a cookie value from request headers
///
/// # Arguments
/// * `headers` - Request headers
/// * `cookie_name` - Name of cookie to extract
///
/// # Returns
/// Cookie value if found, None otherwise
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            let name = parts.next()?.trim();
            let value = parts.next()?.trim();

            if name == cookie_name {
                Some(value.to_owned())
            } else {
                None
            }
        })
}
