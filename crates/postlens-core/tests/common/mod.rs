#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use postlens_core::nlp::{
    CapabilityError, CapabilityRegistry, LanguageCode, LanguageDetector, LinguisticAnnotator,
    PartOfSpeech, SentimentPrediction, SentimentPredictor, Token,
};
use postlens_core::types::Post;

/// Always answers with the same language, or fails when `code` is `None`.
pub struct FixedDetector(pub Option<&'static str>);

impl LanguageDetector for FixedDetector {
    fn name(&self) -> &'static str {
        "fixed_detector"
    }

    fn detect(&self, text: &str) -> Result<LanguageCode, CapabilityError> {
        if text.trim().is_empty() {
            return Err(CapabilityError::detection("empty text"));
        }
        self.0
            .map(LanguageCode::new)
            .ok_or_else(|| CapabilityError::detection("stub cannot detect"))
    }
}

/// Tags every whitespace word as a noun unless it is listed as a stopword.
pub struct WordAnnotator {
    pub stopwords: &'static [&'static str],
}

impl LinguisticAnnotator for WordAnnotator {
    fn name(&self) -> &'static str {
        "word_annotator"
    }

    fn annotate(&self, text: &str) -> Result<Vec<Token>, CapabilityError> {
        Ok(text
            .split_whitespace()
            .map(|raw| {
                let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
                let lower = word.to_lowercase();
                let is_stop = self.stopwords.contains(&lower.as_str());
                Token {
                    text: word.to_string(),
                    lemma: lower,
                    pos: if is_stop {
                        PartOfSpeech::Function
                    } else {
                        PartOfSpeech::Noun
                    },
                    is_stop,
                    is_alpha: !word.is_empty() && word.chars().all(char::is_alphabetic),
                }
            })
            .collect())
    }
}

pub struct FailingAnnotator;

impl LinguisticAnnotator for FailingAnnotator {
    fn name(&self) -> &'static str {
        "failing_annotator"
    }

    fn annotate(&self, _text: &str) -> Result<Vec<Token>, CapabilityError> {
        Err(CapabilityError::runtime(
            "annotator",
            &LanguageCode::new("pt"),
            "model crashed",
        ))
    }
}

/// Returns a fixed label and distribution.
pub struct FixedSentiment {
    pub label: &'static str,
    pub probas: &'static [(&'static str, f64)],
}

impl SentimentPredictor for FixedSentiment {
    fn name(&self) -> &'static str {
        "fixed_sentiment"
    }

    fn predict(&self, _text: &str) -> Result<SentimentPrediction, CapabilityError> {
        Ok(SentimentPrediction {
            output: self.label.to_string(),
            probas: self
                .probas
                .iter()
                .map(|(label, p)| (label.to_string(), *p))
                .collect::<BTreeMap<_, _>>(),
        })
    }
}

pub struct FailingSentiment;

impl SentimentPredictor for FailingSentiment {
    fn name(&self) -> &'static str {
        "failing_sentiment"
    }

    fn predict(&self, _text: &str) -> Result<SentimentPrediction, CapabilityError> {
        Err(CapabilityError::runtime(
            "sentiment",
            &LanguageCode::new("pt"),
            "out of memory",
        ))
    }
}

/// Panics on any text containing `boom`, otherwise behaves like [`WordAnnotator`].
pub struct PanickingAnnotator;

impl LinguisticAnnotator for PanickingAnnotator {
    fn name(&self) -> &'static str {
        "panicking_annotator"
    }

    fn annotate(&self, text: &str) -> Result<Vec<Token>, CapabilityError> {
        if text.contains("boom") {
            panic!("annotator blew up on {text:?}");
        }
        WordAnnotator { stopwords: &[] }.annotate(text)
    }
}

pub struct PanickingSentiment;

impl SentimentPredictor for PanickingSentiment {
    fn name(&self) -> &'static str {
        "panicking_sentiment"
    }

    fn predict(&self, _text: &str) -> Result<SentimentPrediction, CapabilityError> {
        panic!("sentiment model unavailable");
    }
}

pub struct PanickingDetector;

impl LanguageDetector for PanickingDetector {
    fn name(&self) -> &'static str {
        "panicking_detector"
    }

    fn detect(&self, _text: &str) -> Result<LanguageCode, CapabilityError> {
        panic!("detector crashed");
    }
}

pub const PT_STOPWORDS: &[&str] = &["a", "o", "à", "de", "está", "fui", "e"];

/// Portuguese-only registry backed by the stubs above.
pub fn pt_registry() -> CapabilityRegistry {
    let pt = LanguageCode::new("pt");
    CapabilityRegistry::new(Arc::new(FixedDetector(Some("pt"))))
        .with_annotator(
            pt.clone(),
            Arc::new(WordAnnotator {
                stopwords: PT_STOPWORDS,
            }),
        )
        .with_sentiment(
            pt,
            Arc::new(FixedSentiment {
                label: "POS",
                probas: &[("NEG", 0.1), ("NEU", 0.2), ("POS", 0.7)],
            }),
        )
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

pub fn post(id: &str, text: Option<&str>, score: i64, num_comments: u32) -> Post {
    Post {
        id: id.to_string(),
        title: format!("title {id}"),
        created_at: at(2024, 7, 1, 12, 30),
        url: format!("https://example.org/{id}"),
        text: text.map(str::to_string),
        flair: None,
        score,
        upvote_ratio: 0.9,
        num_comments,
        last_updated: None,
    }
}
