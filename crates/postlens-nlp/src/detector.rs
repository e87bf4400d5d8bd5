use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::errors::CapabilityError;
use crate::lexicon::{all_lexicons, lowercase_words, LanguageLexicon};
use crate::model::{DetectedLanguage, LanguageCode};

/// Guesses the language of free text.
///
/// Implementations report failures as [`CapabilityError`]. A panic is caught
/// by [`detect_language`] and treated as a failed detection.
pub trait LanguageDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, text: &str) -> Result<LanguageCode, CapabilityError>;
}

/// Runs `detector`, folding every failure (panics included) into
/// [`DetectedLanguage::Unknown`].
pub fn detect_language(detector: &dyn LanguageDetector, text: &str) -> DetectedLanguage {
    let result = panic::catch_unwind(AssertUnwindSafe(|| detector.detect(text)))
        .unwrap_or_else(|payload| Err(CapabilityError::panicked("detector", payload)));
    match result {
        Ok(code) => DetectedLanguage::Known(code),
        Err(err) => {
            debug!(detector = detector.name(), error = %err, "language detection fell back to unknown");
            DetectedLanguage::Unknown
        }
    }
}

/// Scores each known language by stopword hits plus orthographic markers and
/// picks a strict winner.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopwordDetector;

impl StopwordDetector {
    fn score(lexicon: &LanguageLexicon, words: &[String], text: &str) -> usize {
        let hits = words
            .iter()
            .filter(|word| lexicon.is_stopword(word))
            .count();
        let markers = text
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| lexicon.markers.contains(c))
            .count();
        hits + markers
    }
}

impl LanguageDetector for StopwordDetector {
    fn name(&self) -> &'static str {
        "stopword_detector_v1"
    }

    fn detect(&self, text: &str) -> Result<LanguageCode, CapabilityError> {
        let words: Vec<String> = lowercase_words(text).collect();
        if words.is_empty() {
            return Err(CapabilityError::detection("no words in input"));
        }

        let mut scores: Vec<(&'static str, usize)> = all_lexicons()
            .iter()
            .map(|lexicon| (lexicon.code, Self::score(lexicon, &words, text)))
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1));

        match scores.as_slice() {
            [(_, 0), ..] | [] => Err(CapabilityError::detection("no linguistic evidence")),
            [(best, top), (runner_up, second), ..] if top == second => {
                Err(CapabilityError::detection(format!(
                    "ambiguous between {best} and {runner_up}"
                )))
            }
            [(best, _), ..] => Ok(LanguageCode::new(best)),
        }
    }
}
