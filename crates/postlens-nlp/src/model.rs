use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Label recorded for text whose language could not be determined.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Lowercase ISO 639-1 style language code (`en`, `pt`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Outcome of language detection as seen by downstream stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DetectedLanguage {
    Known(LanguageCode),
    Unknown,
}

impl DetectedLanguage {
    pub fn code(&self) -> Option<&LanguageCode> {
        match self {
            Self::Known(code) => Some(code),
            Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(code) => code.as_str(),
            Self::Unknown => UNKNOWN_LANGUAGE,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Numeral,
    Function,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    pub fn is_content_bearing(self) -> bool {
        matches!(self, Self::Noun | Self::Adjective)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub is_alpha: bool,
}

/// A predicted label together with the full label distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentPrediction {
    pub output: String,
    pub probas: BTreeMap<String, f64>,
}

impl SentimentPrediction {
    /// Probability mass assigned to the predicted label.
    pub fn probability(&self) -> Option<f64> {
        self.probas.get(&self.output).copied()
    }
}
