//! Proofreader: normalization plus optional formal sentence casing

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// Lowercase letter at start of text or after sentence punctuation
static SENTENCE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[.!?]\s*)(\p{Ll})").expect("sentence start pattern is valid"));

/// Proofreading style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProofreadStyle {
    #[default]
    Formal,
    #[serde(untagged)]
    Other(String),
}

impl ProofreadStyle {
    pub fn as_str(&self) -> &str {
        match self {
            ProofreadStyle::Formal => "formal",
            ProofreadStyle::Other(s) => s,
        }
    }
}

/// Clean up `text`
///
/// `language` is accepted for parity with remote backends and does not change
/// the local result.
pub fn proofread(text: &str, _language: &str, style: &ProofreadStyle) -> String {
    let normalized = normalize(text);

    match style {
        ProofreadStyle::Formal => formalize(&normalized),
        ProofreadStyle::Other(_) => normalized,
    }
}

fn formalize(text: &str) -> String {
    let mut result = SENTENCE_START_RE
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned();

    if !result.is_empty() && !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formal_capitalizes_and_terminates() {
        assert_eq!(
            proofread("hello world", "en", &ProofreadStyle::Formal),
            "Hello world."
        );
    }

    #[test]
    fn test_formal_capitalizes_after_each_terminator() {
        assert_eq!(
            proofread("roads flooded.  stay inside!  any questions?  call us", "en", &ProofreadStyle::Formal),
            "Roads flooded. Stay inside! Any questions? Call us."
        );
    }

    #[test]
    fn test_formal_capitalizes_without_space_after_period() {
        assert_eq!(
            proofread("zone a.zone b", "en", &ProofreadStyle::Formal),
            "Zone a.Zone b."
        );
    }

    #[test]
    fn test_formal_keeps_existing_terminator() {
        assert_eq!(
            proofread("Evacuate now!", "en", &ProofreadStyle::Formal),
            "Evacuate now!"
        );
    }

    #[test]
    fn test_formal_empty_stays_empty() {
        assert_eq!(proofread("   ", "en", &ProofreadStyle::Formal), "");
    }

    #[test]
    fn test_non_letter_start_is_left_alone() {
        assert_eq!(
            proofread("3 families need water", "en", &ProofreadStyle::Formal),
            "3 families need water."
        );
    }

    #[test]
    fn test_informal_only_normalizes() {
        let style = ProofreadStyle::Other("casual".to_string());
        assert_eq!(proofread("  hello \n world ", "en", &style), "hello world");
    }

    #[test]
    fn test_language_does_not_alter_result() {
        assert_eq!(
            proofread("hola mundo", "es", &ProofreadStyle::Formal),
            proofread("hola mundo", "en", &ProofreadStyle::Formal)
        );
    }

    #[test]
    fn test_style_names() {
        assert_eq!(ProofreadStyle::default().as_str(), "formal");
        let style: ProofreadStyle = serde_json::from_str("\"casual\"").unwrap();
        assert_eq!(style.as_str(), "casual");
    }
}
