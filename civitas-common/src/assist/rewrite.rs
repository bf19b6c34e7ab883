//! Tone rewriter using a fixed emergency-domain lexicon
//!
//! Each lexicon entry is applied as three plain substring replacements
//! (lowercase, capitalized, upper case), in table order. Replacements are not
//! word-bounded and later entries see the output of earlier ones.

use serde::{Deserialize, Serialize};

/// Emergency-domain vocabulary, applied in this order
pub const LEXICON: &[(&str, &str)] = &[
    ("urgent", "critical"),
    ("help", "assistance"),
    ("problem", "emergency situation"),
    ("bad", "concerning"),
    ("need", "require"),
    ("quickly", "immediately"),
    ("ASAP", "immediately"),
    ("broken", "damaged"),
];

/// Contraction expansions applied for a professional tone
const CONTRACTIONS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
];

/// Rewrite tone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    #[serde(untagged)]
    Other(String),
}

impl Tone {
    pub fn as_str(&self) -> &str {
        match self {
            Tone::Professional => "professional",
            Tone::Other(s) => s,
        }
    }
}

/// Rewrite `text` with the domain lexicon
///
/// `style` and `audience` are carried for remote backends only.
pub fn rewrite(text: &str, tone: &Tone, _style: &str, _audience: &str) -> String {
    let mut rewritten = text.to_string();

    for (from, to) in LEXICON {
        for (from_variant, to_variant) in case_variants(from, to) {
            rewritten = rewritten.replace(&from_variant, &to_variant);
        }
    }

    if *tone == Tone::Professional {
        for (from, to) in CONTRACTIONS {
            rewritten = rewritten.replace(from, to);
        }
    }

    rewritten
}

/// (lowercase, capitalized, upper case) pairs for one lexicon entry
fn case_variants(from: &str, to: &str) -> [(String, String); 3] {
    [
        (from.to_lowercase(), to.to_lowercase()),
        (capitalize(&from.to_lowercase()), capitalize(&to.to_lowercase())),
        (from.to_uppercase(), to.to_uppercase()),
    ]
}

/// Uppercase the first character, leave the rest untouched
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
