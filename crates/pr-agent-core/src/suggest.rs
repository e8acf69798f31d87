//! Template suggestion from a free-text change type.
//!
//! A static synonym table maps surface forms ("bugfix", "perf", ...) to the
//! canonical categories of the catalog. Unrecognized input falls back to
//! `feature`, so suggestion is total: every input pair yields a result.

use serde::Serialize;

use crate::catalog::{template_index, TEMPLATES};

const DEFAULT_CATEGORY: &str = "feature";
const ALTERNATIVE_COUNT: usize = 3;

/// Surface forms accepted for each canonical category.
const SYNONYMS: &[(&str, &str)] = &[
    ("bug", "bug"),
    ("fix", "bug"),
    ("bugfix", "bug"),
    ("hotfix", "bug"),
    ("feature", "feature"),
    ("feat", "feature"),
    ("enhancement", "feature"),
    ("new feature", "feature"),
    ("docs", "docs"),
    ("doc", "docs"),
    ("documentation", "docs"),
    ("refactor", "refactor"),
    ("refactoring", "refactor"),
    ("cleanup", "refactor"),
    ("test", "test"),
    ("tests", "test"),
    ("testing", "test"),
    ("performance", "performance"),
    ("optimization", "performance"),
    ("perf", "performance"),
    ("security", "security"),
    ("vulnerability", "security"),
];

/// Per-category keywords echoed in the reasoning when they appear in the
/// change summary. Advisory only; never drives the recommendation.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("bug", &["fix", "error", "crash", "bug"]),
    ("feature", &["add", "new", "implement", "support"]),
    ("docs", &["readme", "document", "comment", "guide"]),
    ("refactor", &["refactor", "clean", "restructure", "simplify"]),
    ("test", &["test", "coverage", "assert"]),
    ("performance", &["performance", "speed", "optimiz", "slow", "memory"]),
    ("security", &["security", "vulnerab", "auth", "sanitiz"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The change type matched a synonym-table key exactly.
    High,
    /// The change type was unrecognized and the default category was used.
    Medium,
    /// Reserved for future heuristics; never produced by the current policy.
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub recommended: String,
    pub alternatives: Vec<String>,
    pub reasoning: String,
    pub confidence: Confidence,
}

/// Map a free-text change type to a template recommendation.
pub fn suggest(changes_summary: &str, change_type: &str) -> Suggestion {
    let normalized = change_type.trim().to_lowercase();
    let matched = SYNONYMS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, category)| *category);
    let category = matched.unwrap_or(DEFAULT_CATEGORY);
    let confidence = if matched.is_some() {
        Confidence::High
    } else {
        Confidence::Medium
    };

    // Canonical categories double as template ids, so this cannot miss.
    let index = template_index(category).unwrap_or(0);
    let recommended = TEMPLATES[index].id.to_string();
    let alternatives: Vec<String> = (1..=ALTERNATIVE_COUNT)
        .map(|offset| TEMPLATES[(index + offset) % TEMPLATES.len()].id.to_string())
        .collect();

    let keywords = matched_keywords(changes_summary, category);
    let reasoning = build_reasoning(change_type, category, confidence, &keywords);

    Suggestion {
        recommended,
        alternatives,
        reasoning,
        confidence,
    }
}

fn matched_keywords(summary: &str, category: &str) -> Vec<&'static str> {
    let summary = summary.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(cat, _)| *cat == category)
        .map(|(_, words)| {
            words
                .iter()
                .copied()
                .filter(|word| summary.contains(word))
                .take(2)
                .collect()
        })
        .unwrap_or_default()
}

fn build_reasoning(
    change_type: &str,
    category: &str,
    confidence: Confidence,
    keywords: &[&str],
) -> String {
    let mut reasoning = if confidence == Confidence::High {
        format!(
            "Change type '{}' maps to the {} category.",
            change_type.trim(),
            category
        )
    } else {
        format!(
            "Change type '{}' is not recognized; defaulting to the {} category.",
            change_type.trim(),
            category
        )
    };

    match keywords {
        [] => {}
        [only] => reasoning.push_str(&format!(" The summary mentions \"{only}\".")),
        [first, second, ..] => {
            reasoning.push_str(&format!(" The summary mentions \"{first}\" and \"{second}\"."))
        }
    }

    reasoning
}
