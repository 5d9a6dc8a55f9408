// ABOUTME: Ordered turn assembly for each insight kind
// ABOUTME: Fixed personas, contextual facts, and the suggestion sub-mode switch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LexPrep

//! Prompt builder
//!
//! Consumes one classified [`InsightRequest`] and produces the ordered
//! [`ChatRequest`] handed to the completion client. Each kind fixes its
//! persona preamble and generation parameters; nothing here is computed
//! from the content beyond the sub-mode keyword check.

use crate::insights::enrichment::SearchSnippets;
use crate::insights::InsightRequest;
use crate::llm::{prompts, ChatMessage, ChatRequest, MessageRole};
use crate::models::{CallerRef, ContributionRef, QuestionRef};
use std::fmt::Write;

/// Sampling temperature shared by every insight kind
const INSIGHT_TEMPERATURE: f32 = 0.7;

/// Reply bound for the JSON suggestion sub-mode
const SUGGESTION_MAX_TOKENS: u32 = 400;

/// Reply bound for search-term analysis
const SEARCH_ANALYSIS_MAX_TOKENS: u32 = 600;

/// A fully assembled prompt ready for the completion client
#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    /// The outbound completion request
    pub request: ChatRequest,
    /// Whether the suggestion sub-mode preamble was selected
    pub suggestion_mode: bool,
}

/// Keyword check for the suggestion-generation sub-mode
///
/// This is a policy, not a parser: the frontend's suggestion feature phrases
/// its request as "generate N prompts with emojis", and a permissive
/// substring test is intentionally kept in one place so it can later be
/// replaced with an explicit request flag. It is only consulted for the
/// question and contribution kinds, so it can never overlap with
/// search-analysis decomposition.
#[must_use]
pub fn wants_suggestion_mode(prompt: &str) -> bool {
    let lowered = prompt.to_lowercase();
    lowered.contains("generate")
        && (lowered.contains("prompts") || lowered.contains("questions"))
        && lowered.contains("emoji")
}

/// Assemble the ordered turn sequence for one insight request
#[must_use]
pub fn build_prompt(
    request: &InsightRequest,
    caller: Option<&CallerRef>,
    snippets: Option<&SearchSnippets>,
) -> BuiltPrompt {
    match request {
        InsightRequest::QuestionInsight { prompt, question } => {
            build_question_prompt(prompt, question, caller)
        }
        InsightRequest::ContributionInsight {
            prompt,
            question,
            contribution,
        } => build_contribution_prompt(prompt, question, contribution, caller),
        InsightRequest::ContextInsight { messages } => build_context_prompt(messages),
        InsightRequest::SearchAnalysis { query } => build_search_prompt(query, snippets),
    }
}

fn build_question_prompt(
    prompt: &str,
    question: &QuestionRef,
    caller: Option<&CallerRef>,
) -> BuiltPrompt {
    let suggestion_mode = wants_suggestion_mode(prompt);
    let system = if suggestion_mode {
        prompts::suggestion_generation_prompt()
    } else {
        prompts::question_insight_prompt()
    };

    let mut context = String::from("Question under analysis:\n");
    push_question_facts(&mut context, question);
    push_caller_fact(&mut context, caller);

    let messages = vec![
        ChatMessage::system(system),
        ChatMessage::user(context),
        ChatMessage::user(prompt),
    ];

    BuiltPrompt {
        request: finish_request(ChatRequest::new(messages), suggestion_mode),
        suggestion_mode,
    }
}

fn build_contribution_prompt(
    prompt: &str,
    question: &QuestionRef,
    contribution: &ContributionRef,
    caller: Option<&CallerRef>,
) -> BuiltPrompt {
    let suggestion_mode = wants_suggestion_mode(prompt);
    let system = if suggestion_mode {
        prompts::suggestion_generation_prompt()
    } else {
        prompts::contribution_insight_prompt()
    };

    let mut context = String::from("Question under analysis:\n");
    push_question_facts(&mut context, question);
    let _ = writeln!(context, "\nContribution under review:\n{}", contribution.text);
    if let Some(author) = &contribution.author {
        let _ = writeln!(context, "Contributed by: {author}");
    }
    push_caller_fact(&mut context, caller);

    let messages = vec![
        ChatMessage::system(system),
        ChatMessage::user(context),
        ChatMessage::user(prompt),
    ];

    BuiltPrompt {
        request: finish_request(ChatRequest::new(messages), suggestion_mode),
        suggestion_mode,
    }
}

/// Forward caller turns, prepending the default system turn only when the
/// sequence contains none. Caller-supplied turns are never mutated.
fn build_context_prompt(messages: &[ChatMessage]) -> BuiltPrompt {
    let has_system = messages.iter().any(|m| m.role == MessageRole::System);

    let outbound = if has_system {
        messages.to_vec()
    } else {
        let mut with_default = Vec::with_capacity(messages.len() + 1);
        with_default.push(ChatMessage::system(prompts::conversation_prompt()));
        with_default.extend_from_slice(messages);
        with_default
    };

    BuiltPrompt {
        request: ChatRequest::new(outbound).with_temperature(INSIGHT_TEMPERATURE),
        suggestion_mode: false,
    }
}

fn build_search_prompt(query: &str, snippets: Option<&SearchSnippets>) -> BuiltPrompt {
    let mut messages = vec![ChatMessage::system(prompts::search_analysis_prompt())];

    if let Some(snippets) = snippets {
        if let Some(context) = snippets.context_block() {
            messages.push(ChatMessage::user(context));
        }
    }

    messages.push(ChatMessage::user(format!("Search term: {query}")));

    BuiltPrompt {
        request: ChatRequest::new(messages)
            .with_temperature(INSIGHT_TEMPERATURE)
            .with_max_tokens(SEARCH_ANALYSIS_MAX_TOKENS),
        suggestion_mode: false,
    }
}

fn push_question_facts(context: &mut String, question: &QuestionRef) {
    let _ = writeln!(context, "{}", question.text);
    if let Some(course) = &question.course {
        let _ = writeln!(context, "Course: {course}");
    }
    if let Some(institution) = &question.institution {
        let _ = writeln!(context, "Institution: {institution}");
    }
}

fn push_caller_fact(context: &mut String, caller: Option<&CallerRef>) {
    if let Some(caller) = caller {
        let _ = writeln!(context, "Asked by: {}", caller.display_name);
    }
}

fn finish_request(request: ChatRequest, suggestion_mode: bool) -> ChatRequest {
    let request = request.with_temperature(INSIGHT_TEMPERATURE);
    if suggestion_mode {
        request
            .with_max_tokens(SUGGESTION_MAX_TOKENS)
            .with_json_response()
    } else {
        request
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ModelTier;

    fn question() -> QuestionRef {
        QuestionRef {
            text: "Discuss the rule in Rylands v Fletcher.".to_owned(),
            course: Some("Law of Torts".to_owned()),
            institution: Some("University of Lagos".to_owned()),
        }
    }

    fn caller() -> CallerRef {
        CallerRef {
            display_name: "Ada".to_owned(),
        }
    }

    #[test]
    fn question_prompt_uses_persona_and_fixed_params() {
        let request = InsightRequest::QuestionInsight {
            prompt: "What are the key issues?".to_owned(),
            question: question(),
        };
        let built = build_prompt(&request, Some(&caller()), None);

        assert!(!built.suggestion_mode);
        assert_eq!(built.request.model_tier, ModelTier::Advanced);
        assert!((built.request.temperature - 0.7).abs() < f32::EPSILON);
        assert!(!built.request.json_response);

        let system = &built.request.messages[0];
        assert_eq!(system.role, MessageRole::System);
        assert!(system.content.contains("past examination questions"));

        let context = &built.request.messages[1].content;
        assert!(context.contains("Rylands v Fletcher"));
        assert!(context.contains("Law of Torts"));
        assert!(context.contains("University of Lagos"));
        assert!(context.contains("Ada"));
    }

    #[test]
    fn suggestion_keywords_switch_to_json_preamble() {
        let request = InsightRequest::QuestionInsight {
            prompt: "Generate 5 questions with emojis about this topic".to_owned(),
            question: question(),
        };
        let built = build_prompt(&request, None, None);

        assert!(built.suggestion_mode);
        assert!(built.request.json_response);
        assert_eq!(built.request.max_tokens, Some(400));
        assert!(built.request.messages[0].content.contains("\"emoji\""));
    }

    #[test]
    fn suggestion_predicate_is_case_insensitive_and_requires_all_markers() {
        assert!(wants_suggestion_mode("Generate 3 prompts with emojis"));
        assert!(wants_suggestion_mode("generate QUESTIONS with an emoji each"));
        assert!(!wants_suggestion_mode("Generate an outline"));
        assert!(!wants_suggestion_mode("questions with emojis"));
    }

    #[test]
    fn contribution_prompt_includes_both_snapshots() {
        let request = InsightRequest::ContributionInsight {
            prompt: "Is this answer complete?".to_owned(),
            question: question(),
            contribution: ContributionRef {
                text: "The defendant is strictly liable.".to_owned(),
                author: Some("Chidi".to_owned()),
            },
        };
        let built = build_prompt(&request, None, None);

        assert!(built.request.messages[0]
            .content
            .contains("contributed answer"));
        let context = &built.request.messages[1].content;
        assert!(context.contains("strictly liable"));
        assert!(context.contains("Chidi"));
    }

    #[test]
    fn context_without_system_turn_gets_default_prepended() {
        let request = InsightRequest::ContextInsight {
            messages: vec![
                ChatMessage::user("What is estoppel?"),
                ChatMessage::assistant("Estoppel prevents..."),
            ],
        };
        let built = build_prompt(&request, None, None);

        assert_eq!(built.request.messages.len(), 3);
        assert_eq!(built.request.messages[0].role, MessageRole::System);
        // Caller turns forwarded unmodified, in order
        assert_eq!(built.request.messages[1].content, "What is estoppel?");
        assert_eq!(built.request.messages[2].content, "Estoppel prevents...");
    }

    #[test]
    fn context_with_system_turn_is_forwarded_unmodified() {
        let turns = vec![
            ChatMessage::system("Custom persona"),
            ChatMessage::user("Continue"),
        ];
        let request = InsightRequest::ContextInsight {
            messages: turns.clone(),
        };
        let built = build_prompt(&request, None, None);

        assert_eq!(built.request.messages, turns);
    }

    #[test]
    fn search_prompt_bounds_reply_and_carries_enrichment() {
        let snippets = SearchSnippets {
            question: Some("Past question: discuss res judicata.".to_owned()),
            course: Some("Civil Procedure".to_owned()),
        };
        let request = InsightRequest::SearchAnalysis {
            query: "res judicata".to_owned(),
        };
        let built = build_prompt(&request, None, Some(&snippets));

        assert_eq!(built.request.max_tokens, Some(600));
        assert!(!built.request.json_response);
        let combined: String = built
            .request
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect();
        assert!(combined.contains("res judicata"));
        assert!(combined.contains("Civil Procedure"));
    }

    #[test]
    fn search_prompt_without_enrichment_still_builds() {
        let request = InsightRequest::SearchAnalysis {
            query: "ultra vires".to_owned(),
        };
        let built = build_prompt(&request, None, None);

        assert_eq!(built.request.messages.len(), 2);
        assert!(built.request.messages[1].content.contains("ultra vires"));
    }
}
