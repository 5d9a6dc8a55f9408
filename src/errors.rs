// ABOUTME: Unified error handling for the insight generation pipeline
// ABOUTME: Maps each failure kind to an HTTP status and a caller-safe JSON body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Application error types
//!
//! One `AppError` enum covers the whole pipeline. Failures before the
//! upstream completion call (auth, classification) are cheap and terminal;
//! failures of the call itself keep the provider's message as diagnostic
//! detail only, never as the user-facing text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error
#[derive(Debug, Error)]
pub enum AppError {
    /// No caller identity could be established (401)
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// A caller identity was supplied but could not be validated (401)
    #[error("Authentication failed: {0}")]
    AuthInvalid(String),

    /// The request payload is malformed or of an unknown kind (400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external service call failed (500)
    #[error("{service} error: {message}")]
    ExternalService {
        /// Name of the external service
        service: String,
        /// Diagnostic message from the failed call
        message: String,
    },

    /// Server configuration is missing or invalid (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Missing caller identity (no token supplied)
    pub fn auth_required(msg: impl Into<String>) -> Self {
        Self::AuthRequired(msg.into())
    }

    /// Invalid caller identity (token rejected by the resolver)
    pub fn auth_invalid(msg: impl Into<String>) -> Self {
        Self::AuthInvalid(msg.into())
    }

    /// Malformed or unclassifiable request payload
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Referenced entity does not exist
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// External service call failed
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Missing or invalid server configuration
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Unexpected internal failure
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthRequired(_) | Self::AuthInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ExternalService { .. } | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error body sent to callers: `{ "error": ..., "details": ... }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Caller-safe error message
    pub error: String,
    /// Diagnostic detail (upstream error text), omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::ExternalService { message, .. } => ErrorBody {
                error: "Failed to generate insights".to_owned(),
                details: Some(message.clone()),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        };

        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Request rejected: {self}");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::auth_required("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::auth_invalid("bad token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::invalid_input("Unknown request type").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::external_service("completion provider", "timeout").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::config("missing key").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_detail_is_diagnostic_only() {
        let err = AppError::external_service("completion provider", "HTTP 503 from upstream");
        let AppError::ExternalService { message, .. } = &err else {
            unreachable!();
        };
        // The user-facing message never echoes the provider error verbatim
        assert_eq!(message, "HTTP 503 from upstream");
        assert!(err.to_string().contains("completion provider"));
    }
}
