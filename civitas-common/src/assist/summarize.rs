//! Word-budgeted extractive summarizer
//!
//! Keeps whole leading sentences while they fit the word budget. When not even
//! the first sentence fits, the text is hard-truncated to the budget and marked
//! with an ellipsis.

use serde::{Deserialize, Serialize};

/// Default word budget used by report ingestion and the HTTP endpoint
pub const DEFAULT_MAX_WORDS: i64 = 100;

/// Marker appended to hard-truncated summaries
const ELLIPSIS: &str = "...";

/// Requested summary style
///
/// Forwarded to a remote backend; the local summarizer ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    #[default]
    Concise,
    KeyPoints,
    Headline,
    #[serde(untagged)]
    Other(String),
}

impl SummaryStyle {
    pub fn as_str(&self) -> &str {
        match self {
            SummaryStyle::Concise => "concise",
            SummaryStyle::KeyPoints => "key_points",
            SummaryStyle::Headline => "headline",
            SummaryStyle::Other(s) => s,
        }
    }
}

/// Summarize `text` to at most `max_length` words
///
/// Returns `text` unchanged when it is already within budget. Negative budgets
/// are treated as zero.
pub fn summarize(text: &str, max_length: i64, _style: &SummaryStyle) -> String {
    let budget = usize::try_from(max_length).unwrap_or(0);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.len() <= budget {
        return text.to_string();
    }

    match leading_sentences(text, budget) {
        Some(summary) => summary,
        None => hard_truncate(&tokens, budget),
    }
}

/// Greedily collect whole sentences while the running word count fits
fn leading_sentences(text: &str, budget: usize) -> Option<String> {
    let mut words: Vec<&str> = Vec::new();
    let mut sentences_taken = 0usize;

    for sentence in text.split('.') {
        let sentence_words: Vec<&str> = sentence.split_whitespace().collect();
        if sentence_words.is_empty() {
            continue;
        }
        if words.len() + sentence_words.len() > budget {
            break;
        }
        words.extend(sentence_words);
        sentences_taken += 1;
    }

    if sentences_taken == 0 {
        return None;
    }

    let mut summary = words.join(" ");
    if !summary.ends_with('.') {
        summary.push('.');
    }
    Some(summary)
}

fn hard_truncate(tokens: &[&str], budget: usize) -> String {
    let kept = &tokens[..budget.min(tokens.len())];
    format!("{}{}", kept.join(" "), ELLIPSIS)
}
