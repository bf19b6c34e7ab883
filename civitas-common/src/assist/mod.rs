//! Text assist engine
//!
//! Five text operations used when filing reports and issuing alerts:
//! summarize, proofread, rewrite, translate and strategy prompt generation.
//!
//! Callers go through the [`TextAssist`] capability so a remote model backend
//! and the deterministic [`FallbackAssist`] are interchangeable. Every
//! operation is total: it returns a string for any input and never errors.

pub mod normalize;
pub mod proofread;
pub mod rewrite;
pub mod strategy;
pub mod summarize;
pub mod translate;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use normalize::normalize;
pub use proofread::{proofread, ProofreadStyle};
pub use rewrite::{rewrite, Tone};
pub use strategy::{generate, Role, StrategyTemplate, TaskType};
pub use summarize::{summarize, SummaryStyle, DEFAULT_MAX_WORDS};
pub use translate::{translate, AUTO_DETECT};

/// Options for [`TextAssist::summarize`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Word budget
    pub max_length: i64,
    pub style: SummaryStyle,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_WORDS,
            style: SummaryStyle::default(),
        }
    }
}

/// Options for [`TextAssist::proofread`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofreadOptions {
    pub language: String,
    pub style: ProofreadStyle,
}

impl Default for ProofreadOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            style: ProofreadStyle::default(),
        }
    }
}

/// Options for [`TextAssist::rewrite`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    pub tone: Tone,
    pub style: String,
    pub audience: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            style: "clear".to_string(),
            audience: "general".to_string(),
        }
    }
}

/// Options for [`TextAssist::translate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    pub target_language: String,
    /// `"auto"` when unspecified
    pub source_language: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            source_language: AUTO_DETECT.to_string(),
        }
    }
}

impl TranslateOptions {
    pub fn to(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            ..Self::default()
        }
    }
}

/// Input for [`TextAssist::generate_prompt`]
///
/// Task type and role stay free-form strings so unknown values reach the
/// template fallback instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptContext {
    pub context: String,
    pub task_type: String,
    pub role: String,
}

impl Default for PromptContext {
    fn default() -> Self {
        Self {
            context: String::new(),
            task_type: "rescue".to_string(),
            role: "coordinator".to_string(),
        }
    }
}

/// Text assist capability
///
/// Implementations must be total: any failure is absorbed and answered with a
/// usable string.
#[async_trait]
pub trait TextAssist: Send + Sync {
    /// Backend name for logging and health reporting
    fn name(&self) -> &'static str;

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> String;

    async fn proofread(&self, text: &str, options: &ProofreadOptions) -> String;

    async fn rewrite(&self, text: &str, options: &RewriteOptions) -> String;

    async fn translate(&self, text: &str, options: &TranslateOptions) -> String;

    async fn generate_prompt(&self, prompt: &PromptContext) -> String;
}

/// Deterministic local backend
///
/// Stateless; safe to share across any number of request tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAssist;

#[async_trait]
impl TextAssist for FallbackAssist {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> String {
        summarize(text, options.max_length, &options.style)
    }

    async fn proofread(&self, text: &str, options: &ProofreadOptions) -> String {
        proofread(text, &options.language, &options.style)
    }

    async fn rewrite(&self, text: &str, options: &RewriteOptions) -> String {
        rewrite(text, &options.tone, &options.style, &options.audience)
    }

    async fn translate(&self, text: &str, options: &TranslateOptions) -> String {
        translate(text, &options.target_language, &options.source_language)
    }

    async fn generate_prompt(&self, prompt: &PromptContext) -> String {
        generate(&prompt.context, &prompt.task_type, &prompt.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_matches_free_functions() {
        let assist = FallbackAssist;
        let text = "we need help quickly. the bridge is broken";

        assert_eq!(
            assist.summarize(text, &SummaryOptions::default()).await,
            summarize(text, DEFAULT_MAX_WORDS, &SummaryStyle::Concise)
        );
        assert_eq!(
            assist.proofread(text, &ProofreadOptions::default()).await,
            "We need help quickly. The bridge is broken."
        );
        assert_eq!(
            assist.rewrite(text, &RewriteOptions::default()).await,
            "we require assistance immediately. the bridge is damaged"
        );
        assert_eq!(
            assist.translate("Help", &TranslateOptions::to("es")).await,
            "ayuda"
        );
    }

    #[tokio::test]
    async fn test_fallback_usable_as_trait_object() {
        let assist: std::sync::Arc<dyn TextAssist> = std::sync::Arc::new(FallbackAssist);
        let prompt = assist
            .generate_prompt(&PromptContext {
                context: "landslide".to_string(),
                ..PromptContext::default()
            })
            .await;
        assert!(prompt.starts_with("RESCUE COORDINATION STRATEGY"));
        assert_eq!(assist.name(), "fallback");
    }

    #[test]
    fn test_options_defaults_from_empty_json() {
        let options: SummaryOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.max_length, 100);
        let options: TranslateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.target_language, "en");
        assert_eq!(options.source_language, "auto");
        let prompt: PromptContext = serde_json::from_str(r#"{"context":"x"}"#).unwrap();
        assert_eq!(prompt.task_type, "rescue");
        assert_eq!(prompt.role, "coordinator");
    }
}
