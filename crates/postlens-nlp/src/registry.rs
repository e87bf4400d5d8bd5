use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::annotator::{LexiconAnnotator, LinguisticAnnotator};
use crate::detector::{LanguageDetector, StopwordDetector};
use crate::errors::CapabilityError;
use crate::model::LanguageCode;
use crate::sentiment::{LexiconSentimentPredictor, SentimentPredictor};

/// Capabilities registered for one language. Either side may be missing.
#[derive(Clone, Default)]
pub struct LanguageCapabilities {
    pub annotator: Option<Arc<dyn LinguisticAnnotator>>,
    pub sentiment: Option<Arc<dyn SentimentPredictor>>,
}

impl fmt::Debug for LanguageCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageCapabilities")
            .field("annotator", &self.annotator.as_ref().map(|a| a.name()))
            .field("sentiment", &self.sentiment.as_ref().map(|s| s.name()))
            .finish()
    }
}

/// Language detector plus the per-language annotators and predictors.
///
/// Loaded once and shared read-only for a whole run.
#[derive(Clone)]
pub struct CapabilityRegistry {
    detector: Arc<dyn LanguageDetector>,
    languages: BTreeMap<LanguageCode, LanguageCapabilities>,
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("detector", &self.detector.name())
            .field("languages", &self.languages)
            .finish()
    }
}

impl CapabilityRegistry {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self {
            detector,
            languages: BTreeMap::new(),
        }
    }

    /// Stopword detector with lexicon annotators and predictors for every
    /// built-in descriptor.
    pub fn builtin() -> Result<Self, CapabilityError> {
        let mut registry = Self::new(Arc::new(StopwordDetector));
        for descriptor in builtin_capability_descriptors() {
            let language = LanguageCode::new(descriptor.language);
            registry = registry
                .with_annotator(language.clone(), Arc::new(LexiconAnnotator::new(&language)?))
                .with_sentiment(
                    language.clone(),
                    Arc::new(LexiconSentimentPredictor::new(&language)?),
                );
        }
        Ok(registry)
    }

    pub fn with_annotator(
        mut self,
        language: LanguageCode,
        annotator: Arc<dyn LinguisticAnnotator>,
    ) -> Self {
        self.languages.entry(language).or_default().annotator = Some(annotator);
        self
    }

    pub fn with_sentiment(
        mut self,
        language: LanguageCode,
        predictor: Arc<dyn SentimentPredictor>,
    ) -> Self {
        self.languages.entry(language).or_default().sentiment = Some(predictor);
        self
    }

    pub fn detector(&self) -> &dyn LanguageDetector {
        self.detector.as_ref()
    }

    pub fn annotator(&self, language: &LanguageCode) -> Option<&dyn LinguisticAnnotator> {
        self.languages
            .get(language)
            .and_then(|caps| caps.annotator.as_deref())
    }

    pub fn sentiment(&self, language: &LanguageCode) -> Option<&dyn SentimentPredictor> {
        self.languages
            .get(language)
            .and_then(|caps| caps.sentiment.as_deref())
    }

    pub fn languages(&self) -> impl Iterator<Item = (&LanguageCode, &LanguageCapabilities)> {
        self.languages.iter()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityDescriptor {
    pub language: &'static str,
    pub annotator: &'static str,
    pub sentiment: &'static str,
    pub description: &'static str,
}

static CAPABILITIES: Lazy<Vec<CapabilityDescriptor>> = Lazy::new(|| {
    vec![
        CapabilityDescriptor {
            language: "pt",
            annotator: "lexicon_annotator_v1",
            sentiment: "lexicon_sentiment_v1",
            description: "Portuguese keywords and POS/NEG/NEU sentiment",
        },
        CapabilityDescriptor {
            language: "en",
            annotator: "lexicon_annotator_v1",
            sentiment: "lexicon_sentiment_v1",
            description: "English keywords and POS/NEG/NEU sentiment",
        },
        CapabilityDescriptor {
            language: "es",
            annotator: "lexicon_annotator_v1",
            sentiment: "lexicon_sentiment_v1",
            description: "Spanish keywords and POS/NEG/NEU sentiment",
        },
    ]
});

pub fn builtin_capability_descriptors() -> &'static [CapabilityDescriptor] {
    CAPABILITIES.as_slice()
}
