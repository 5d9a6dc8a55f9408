// ABOUTME: Insight request classification over untyped JSON payloads
// ABOUTME: Closed set of insight kinds, explicit failure on unknown discriminants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Insight request model and classifier
//!
//! The frontend sends an untyped JSON body; [`classify`] turns it into
//! exactly one [`InsightRequest`] variant or fails with `InvalidArgument`.
//! The set of kinds is deliberately closed: a new kind requires a new
//! variant, never a default path.

use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, MessageRole};
use crate::models::{ContributionRef, QuestionRef};
use serde_json::Value;

/// Per-kind prompt assembly
pub mod prompt_builder;

/// Free-text reply decomposition for the search-analysis kind
pub mod decompose;

/// Optional prompt enrichment from the platform's keyword search
pub mod enrichment;

pub use decompose::{decompose_analysis, ParsedAnalysis};
pub use prompt_builder::{build_prompt, BuiltPrompt};

/// A classified insight request, one variant per kind
#[derive(Debug, Clone)]
pub enum InsightRequest {
    /// Explain a past examination question
    QuestionInsight {
        /// The caller's free-text ask
        prompt: String,
        /// Snapshot of the question under analysis
        question: QuestionRef,
    },
    /// Critique a student contribution on a question
    ContributionInsight {
        /// The caller's free-text ask
        prompt: String,
        /// Snapshot of the question the contribution answers
        question: QuestionRef,
        /// Snapshot of the contribution
        contribution: ContributionRef,
    },
    /// Continue an open conversation supplied as ordered turns
    ContextInsight {
        /// Caller-supplied turn sequence, order preserved
        messages: Vec<ChatMessage>,
    },
    /// Analyze a bare search term
    SearchAnalysis {
        /// The search term
        query: String,
    },
}

impl InsightRequest {
    /// Whether this kind's reply is decomposed into a [`ParsedAnalysis`]
    #[must_use]
    pub const fn is_search_analysis(&self) -> bool {
        matches!(self, Self::SearchAnalysis { .. })
    }
}

/// Classify an untyped payload into one insight kind
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] when the `type` discriminant is
/// missing or unknown, or a variant's mandatory fields are missing or of
/// the wrong shape.
pub fn classify(payload: &Value) -> AppResult<InsightRequest> {
    let kind = payload
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::invalid_input("Unknown request type"))?;

    match kind {
        "question_insight" => Ok(InsightRequest::QuestionInsight {
            prompt: required_string(payload, "prompt")?,
            question: required_field(payload, "question")?,
        }),
        "contribution_insight" => Ok(InsightRequest::ContributionInsight {
            prompt: required_string(payload, "prompt")?,
            question: required_field(payload, "question")?,
            contribution: required_field(payload, "contribution")?,
        }),
        "context_insight" => Ok(InsightRequest::ContextInsight {
            messages: required_messages(payload)?,
        }),
        "search_analysis" => Ok(InsightRequest::SearchAnalysis {
            query: required_string(payload, "query")?,
        }),
        _ => Err(AppError::invalid_input("Unknown request type")),
    }
}

/// Extract a mandatory non-empty string field
fn required_string(payload: &Value, field: &str) -> AppResult<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AppError::invalid_input(format!("Missing required field: {field}")))
}

/// Extract and deserialize a mandatory object field
fn required_field<T: serde::de::DeserializeOwned>(payload: &Value, field: &str) -> AppResult<T> {
    let value = payload
        .get(field)
        .ok_or_else(|| AppError::invalid_input(format!("Missing required field: {field}")))?;
    serde_json::from_value(value.clone())
        .map_err(|e| AppError::invalid_input(format!("Invalid {field}: {e}")))
}

/// Extract the mandatory non-empty `messages` turn sequence
///
/// A present-but-not-array value is a shape error, not a missing field.
fn required_messages(payload: &Value) -> AppResult<Vec<ChatMessage>> {
    let value = payload
        .get("messages")
        .ok_or_else(|| AppError::invalid_input("Missing required field: messages"))?;

    let items = value
        .as_array()
        .ok_or_else(|| AppError::invalid_input("messages must be an array"))?;

    if items.is_empty() {
        return Err(AppError::invalid_input("messages must not be empty"));
    }

    items
        .iter()
        .map(|item| {
            let role = match item.get("role").and_then(Value::as_str) {
                Some("system") => MessageRole::System,
                Some("user") => MessageRole::User,
                Some("assistant") => MessageRole::Assistant,
                _ => {
                    return Err(AppError::invalid_input(
                        "messages entries must have role system, user, or assistant",
                    ))
                }
            };
            let content = item
                .get("content")
                .and_then(Value::as_str)
                .ok_or_else(|| AppError::invalid_input("messages entries must have content"))?;
            Ok(ChatMessage {
                role,
                content: content.to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_question_insight() {
        let payload = json!({
            "type": "question_insight",
            "prompt": "Explain the issues here",
            "question": {"text": "Discuss offer and acceptance.", "course": "Contract Law"}
        });
        let request = classify(&payload).unwrap();
        let InsightRequest::QuestionInsight { prompt, question } = request else {
            unreachable!("wrong variant");
        };
        assert_eq!(prompt, "Explain the issues here");
        assert_eq!(question.course.as_deref(), Some("Contract Law"));
    }

    #[test]
    fn classifies_search_analysis() {
        let payload = json!({"type": "search_analysis", "query": "res judicata"});
        assert!(classify(&payload).unwrap().is_search_analysis());
    }

    #[test]
    fn missing_type_is_unknown_request_type() {
        let err = classify(&json!({"prompt": "hello"})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Unknown request type");
    }

    #[test]
    fn unknown_type_is_rejected_not_defaulted() {
        let err = classify(&json!({"type": "newsletter", "prompt": "hi"})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Unknown request type");
    }

    #[test]
    fn non_array_messages_is_a_shape_error() {
        let err = classify(&json!({"type": "context_insight", "messages": "hello"})).unwrap_err();
        assert!(err.to_string().contains("messages must be an array"));
    }

    #[test]
    fn empty_messages_is_rejected() {
        let err = classify(&json!({"type": "context_insight", "messages": []})).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn messages_preserve_order_and_roles() {
        let payload = json!({
            "type": "context_insight",
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": "second"},
                {"role": "user", "content": "third"}
            ]
        });
        let InsightRequest::ContextInsight { messages } = classify(&payload).unwrap() else {
            unreachable!("wrong variant");
        };
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[test]
    fn contribution_requires_both_snapshots() {
        let payload = json!({
            "type": "contribution_insight",
            "prompt": "Is this answer right?",
            "question": {"text": "Define consideration."}
        });
        let err = classify(&payload).unwrap_err();
        assert!(err.to_string().contains("contribution"));
    }
}
