// ABOUTME: Heading and bullet decomposition of free-text search-analysis replies
// ABOUTME: Best-effort heuristic with an explicit no-structure fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Response decomposer
//!
//! Splits one free-text completion reply into an analysis string plus two
//! bulleted lists. The input is generated by a third party, so the parser
//! must tolerate missing or partial structure without failing: when no
//! section heading is found, the entire reply becomes the analysis and both
//! lists are empty. The rest of the system depends only on
//! [`ParsedAnalysis`], never on the matching details.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Maximum related topics kept
const MAX_RELATED_TOPICS: usize = 5;

/// Maximum suggested resources kept
const MAX_SUGGESTED_RESOURCES: usize = 4;

fn related_topics_heading() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)related\s+topics").ok())
        .as_ref()
}

fn suggested_resources_heading() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)suggested\s+resources").ok())
        .as_ref()
}

/// Structured decomposition of a search-analysis reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnalysis {
    /// Primary analysis text; never empty when the reply is non-empty
    pub analysis: String,
    /// Related topics, in reply order (0..=5)
    pub related_topics: Vec<String>,
    /// Suggested resources, in reply order (0..=4)
    pub suggested_resources: Vec<String>,
}

/// Decompose a raw reply into analysis text and bulleted lists
#[must_use]
pub fn decompose_analysis(reply: &str) -> ParsedAnalysis {
    let related_start = related_topics_heading()
        .and_then(|re| re.find(reply))
        .map(|m| m.start());
    let resources_start = suggested_resources_heading()
        .and_then(|re| re.find(reply))
        .map(|m| m.start());

    if related_start.is_none() && resources_start.is_none() {
        debug!("No section headings in reply; using full text as analysis");
        return ParsedAnalysis {
            analysis: reply.trim().to_owned(),
            related_topics: Vec::new(),
            suggested_resources: Vec::new(),
        };
    }

    // The analysis is all text before the Related Topics heading; when only
    // the resources heading is present the entire reply stays as analysis,
    // matching the frontend's long-standing parsing contract.
    let analysis_end = related_start.unwrap_or(reply.len());
    let analysis = reply[..analysis_end].trim().to_owned();

    let related_topics = related_start.map_or_else(Vec::new, |start| {
        let end = resources_start.filter(|&s| s > start).unwrap_or(reply.len());
        scan_bullets(&reply[start..end], MAX_RELATED_TOPICS)
    });

    let suggested_resources = resources_start.map_or_else(Vec::new, |start| {
        scan_bullets(&reply[start..], MAX_SUGGESTED_RESOURCES)
    });

    ParsedAnalysis {
        analysis,
        related_topics,
        suggested_resources,
    }
}

/// Collect bulleted lines from a section
///
/// Each line is trimmed; lines opening with `•`, `-`, or `*` are kept with
/// the glyph stripped. Empty remainders are discarded. Non-bullet lines
/// (including the heading line itself) are ignored.
fn scan_bullets(section: &str, limit: usize) -> Vec<String> {
    section
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let stripped = trimmed
                .strip_prefix('•')
                .or_else(|| trimmed.strip_prefix('-'))
                .or_else(|| trimmed.strip_prefix('*'))?;
            let item = stripped.trim();
            (!item.is_empty()).then(|| item.to_owned())
        })
        .take(limit)
        .collect()
}
