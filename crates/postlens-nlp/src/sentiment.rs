use std::collections::BTreeMap;

use crate::errors::CapabilityError;
use crate::lexicon::{lexicon, lowercase_words, LanguageLexicon};
use crate::model::{LanguageCode, SentimentPrediction};

pub const POSITIVE: &str = "POS";
pub const NEGATIVE: &str = "NEG";
pub const NEUTRAL: &str = "NEU";

/// Predicts a sentiment label and the per-label probability distribution.
///
/// Same failure contract as [`crate::LinguisticAnnotator`].
pub trait SentimentPredictor: Send + Sync {
    fn name(&self) -> &'static str;
    fn predict(&self, text: &str) -> Result<SentimentPrediction, CapabilityError>;
}

/// Polarity-lexicon predictor producing a softmax over `POS`/`NEG`/`NEU`.
#[derive(Debug, Clone, Copy)]
pub struct LexiconSentimentPredictor {
    lexicon: &'static LanguageLexicon,
}

const HIT_WEIGHT: f64 = 1.5;
const NEUTRAL_BIAS: f64 = 1.0;

impl LexiconSentimentPredictor {
    pub fn new(language: &LanguageCode) -> Result<Self, CapabilityError> {
        lexicon(language.as_str())
            .filter(|lexicon| lexicon.has_polarity())
            .map(|lexicon| Self { lexicon })
            .ok_or_else(|| CapabilityError::UnsupportedLanguage(language.clone()))
    }
}

impl SentimentPredictor for LexiconSentimentPredictor {
    fn name(&self) -> &'static str {
        "lexicon_sentiment_v1"
    }

    fn predict(&self, text: &str) -> Result<SentimentPrediction, CapabilityError> {
        let (mut positive, mut negative) = (0usize, 0usize);
        for word in lowercase_words(text) {
            if self.lexicon.positive.contains(word.as_str()) {
                positive += 1;
            }
            if self.lexicon.negative.contains(word.as_str()) {
                negative += 1;
            }
        }

        let logits = [
            (NEUTRAL, NEUTRAL_BIAS),
            (POSITIVE, positive as f64 * HIT_WEIGHT),
            (NEGATIVE, negative as f64 * HIT_WEIGHT),
        ];
        let max = logits
            .iter()
            .map(|(_, logit)| *logit)
            .fold(f64::NEG_INFINITY, f64::max);
        let total: f64 = logits.iter().map(|(_, logit)| (logit - max).exp()).sum();

        let mut probas = BTreeMap::new();
        let mut output = NEUTRAL;
        let mut best = f64::NEG_INFINITY;
        for (label, logit) in logits {
            let probability = (logit - max).exp() / total;
            if probability > best {
                best = probability;
                output = label;
            }
            probas.insert(label.to_string(), probability);
        }

        Ok(SentimentPrediction {
            output: output.to_string(),
            probas,
        })
    }
}
