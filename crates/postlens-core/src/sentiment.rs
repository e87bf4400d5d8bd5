use std::panic::{self, AssertUnwindSafe};

use postlens_nlp::{CapabilityError, CapabilityRegistry, DetectedLanguage};
use tracing::warn;

/// Label stored when no sentiment could be produced.
pub const UNSUPPORTED: &str = "unsupported";

#[derive(Debug)]
pub enum SentimentOutcome {
    Scored { label: String, probability: f64 },
    /// No predictor is registered for the language (or it is unknown).
    Unsupported,
    Failed(CapabilityError),
}

impl SentimentOutcome {
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Scored { probability, .. } => Some(*probability),
            Self::Unsupported | Self::Failed(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Scored { label, .. } => label,
            Self::Unsupported | Self::Failed(_) => UNSUPPORTED,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SentimentScorer<'a> {
    registry: &'a CapabilityRegistry,
}

impl<'a> SentimentScorer<'a> {
    pub fn new(registry: &'a CapabilityRegistry) -> Self {
        Self { registry }
    }

    pub fn score(&self, text: &str, language: &DetectedLanguage) -> SentimentOutcome {
        let Some(code) = language.code() else {
            return SentimentOutcome::Unsupported;
        };
        let Some(predictor) = self.registry.sentiment(code) else {
            return SentimentOutcome::Unsupported;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| predictor.predict(text)))
            .unwrap_or_else(|payload| Err(CapabilityError::panicked("sentiment", payload)))
            .and_then(|prediction| {
                let probability =
                    prediction
                        .probability()
                        .ok_or_else(|| CapabilityError::MissingProbability {
                            language: code.clone(),
                            label: prediction.output.clone(),
                        })?;
                if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
                    return Err(CapabilityError::InvalidProbability {
                        label: prediction.output,
                        value: probability,
                    });
                }
                Ok(SentimentOutcome::Scored {
                    label: prediction.output,
                    probability,
                })
            });

        result.unwrap_or_else(|err| {
            warn!(language = %code, predictor = predictor.name(), error = %err, "sentiment prediction failed");
            SentimentOutcome::Failed(err)
        })
    }
}
