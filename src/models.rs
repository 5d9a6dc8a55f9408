// ABOUTME: Read-only projections of LexPrep platform entities
// ABOUTME: Snapshots supplied whole by the calling layer, never mutated here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Domain snapshots
//!
//! The insight pipeline never owns platform data. Questions, contributions,
//! and caller identities arrive as already-fetched projections and are
//! discarded when the response is sent.

use serde::{Deserialize, Serialize};

/// Resolved caller identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerRef {
    /// Display name shown to the completion model for personalization
    pub display_name: String,
}

/// Snapshot of a past question being analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRef {
    /// Full question text
    pub text: String,
    /// Course the question belongs to
    #[serde(default)]
    pub course: Option<String>,
    /// Institution that set the question
    #[serde(default)]
    pub institution: Option<String>,
}

/// Snapshot of a user contribution (an answer or commentary on a question)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionRef {
    /// Contribution text
    pub text: String,
    /// Display name of the contribution's author
    #[serde(default)]
    pub author: Option<String>,
}
