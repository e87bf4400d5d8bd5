use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use postlens_nlp::{CapabilityError, CapabilityRegistry, DetectedLanguage, Token};
use tracing::warn;

/// Result of keyword extraction for one text.
#[derive(Debug)]
pub enum KeywordOutcome {
    Extracted(BTreeSet<String>),
    /// No annotator is registered for the language (or it is unknown).
    Unsupported,
    Failed(CapabilityError),
}

impl KeywordOutcome {
    /// Keywords in their stable (sorted) order; empty unless extracted.
    pub fn keywords(&self) -> Vec<String> {
        match self {
            Self::Extracted(set) => set.iter().cloned().collect(),
            Self::Unsupported | Self::Failed(_) => Vec::new(),
        }
    }
}

/// Pulls content-bearing lemmas (nouns and adjectives) out of text using the
/// annotator registered for the detected language.
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor<'a> {
    registry: &'a CapabilityRegistry,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(registry: &'a CapabilityRegistry) -> Self {
        Self { registry }
    }

    pub fn extract(&self, text: &str, language: &DetectedLanguage) -> KeywordOutcome {
        let Some(code) = language.code() else {
            return KeywordOutcome::Unsupported;
        };
        let Some(annotator) = self.registry.annotator(code) else {
            return KeywordOutcome::Unsupported;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| annotator.annotate(text)))
            .unwrap_or_else(|payload| Err(CapabilityError::panicked("annotator", payload)));
        match result {
            Ok(tokens) => KeywordOutcome::Extracted(select_keywords(&tokens)),
            Err(err) => {
                warn!(language = %code, annotator = annotator.name(), error = %err, "keyword extraction failed");
                KeywordOutcome::Failed(err)
            }
        }
    }
}

fn select_keywords(tokens: &[Token]) -> BTreeSet<String> {
    tokens
        .iter()
        .filter(|token| token.pos.is_content_bearing() && token.is_alpha && !token.is_stop)
        .map(|token| token.lemma.to_lowercase())
        .filter(|lemma| !lemma.is_empty() && lemma.chars().all(char::is_alphabetic))
        .collect()
}
