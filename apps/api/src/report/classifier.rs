//! Suggestion classifier — assigns a type and priority to each raw suggestion.
//!
//! Two rule tables drive classification, and they resolve multiple matches differently:
//! - `PRIORITY_RULES`: every matching keyword overwrites the running priority, so the
//!   LAST match in table order wins.
//! - `TYPE_RULES`: the FIRST category (in table order) with any matching keyword wins.
//!
//! A message mentioning "short" or "length" is replaced by `LENGTH_GUIDANCE` and always
//! classified as `length`/`high`, even over explicit fields on the raw entry.

use crate::report::models::{Priority, RawSuggestion, Suggestion, SuggestionType};

const PRIORITY_RULES: &[(&str, Priority)] = &[
    ("missing", Priority::High),
    ("add", Priority::High),
    ("email", Priority::High),
    ("name", Priority::High),
    ("short", Priority::High),
    ("length", Priority::High),
    ("brief", Priority::High),
    ("bullet", Priority::Medium),
    ("expand", Priority::Medium),
    ("condense", Priority::Medium),
    ("consider", Priority::Medium),
];

const DEFAULT_PRIORITY: Priority = Priority::Medium;

const TYPE_RULES: &[(SuggestionType, &[&str])] = &[
    (
        SuggestionType::Contact,
        &["contact", "email", "phone", "linkedin", "address"],
    ),
    (
        SuggestionType::Experience,
        &["experience", "work history", "job", "accomplishment", "achievement"],
    ),
    (
        SuggestionType::Skills,
        &["skill", "keyword", "certification", "technical"],
    ),
    (
        SuggestionType::Education,
        &["education", "degree", "university", "gpa", "coursework"],
    ),
];

const LENGTH_TRIGGERS: &[&str] = &["short", "length"];

/// Replacement message for any suggestion about resume length.
pub const LENGTH_GUIDANCE: &str = "Your resume is too short. To strengthen it:\n\
- Add more bullet points describing your responsibilities and results\n\
- Include a projects section showcasing relevant work\n\
- Detail your accomplishments with measurable outcomes\n\
- List your technical skills (languages, frameworks, tools)";

/// Classifies a single raw suggestion. Total and deterministic.
pub fn classify(entry: &RawSuggestion) -> Suggestion {
    let text = entry.text();
    let lowered = text.to_lowercase();

    if LENGTH_TRIGGERS.iter().any(|kw| lowered.contains(kw)) {
        return Suggestion {
            message: LENGTH_GUIDANCE.to_string(),
            kind: SuggestionType::Length,
            priority: Priority::High,
        };
    }

    let mut kind = type_for(&lowered);
    let mut priority = priority_for(&lowered);

    if let RawSuggestion::Structured {
        kind: explicit_kind,
        priority: explicit_priority,
        ..
    } = entry
    {
        if let Some(k) = explicit_kind.as_deref().and_then(SuggestionType::parse) {
            kind = k;
        }
        if let Some(p) = explicit_priority.as_deref().and_then(Priority::parse) {
            priority = p;
        }
    }

    Suggestion {
        message: text.to_string(),
        kind,
        priority,
    }
}

/// Last-match-wins scan over `PRIORITY_RULES`. Expects lower-cased text.
pub fn priority_for(lowered: &str) -> Priority {
    PRIORITY_RULES
        .iter()
        .fold(DEFAULT_PRIORITY, |current, (keyword, priority)| {
            if lowered.contains(keyword) {
                *priority
            } else {
                current
            }
        })
}

/// First-match-wins scan over `TYPE_RULES`. Expects lower-cased text.
pub fn type_for(lowered: &str) -> SuggestionType {
    TYPE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(kind, _)| *kind)
        .unwrap_or(SuggestionType::General)
}
