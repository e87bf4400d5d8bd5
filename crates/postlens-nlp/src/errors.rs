use std::any::Any;

use thiserror::Error;

use crate::model::LanguageCode;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("language detection failed: {reason}")]
    Detection { reason: String },

    #[error("no built-in lexicon for language {0}")]
    UnsupportedLanguage(LanguageCode),

    #[error("{capability} failed for language {language}: {message}")]
    Runtime {
        capability: &'static str,
        language: LanguageCode,
        message: String,
    },

    #[error("prediction for {language} has no probability for label {label}")]
    MissingProbability { language: LanguageCode, label: String },

    #[error("probability {value} for label {label} is outside [0, 1]")]
    InvalidProbability { label: String, value: f64 },

    #[error("{capability} panicked: {message}")]
    Panicked {
        capability: &'static str,
        message: String,
    },
}

impl CapabilityError {
    pub fn detection(reason: impl Into<String>) -> Self {
        Self::Detection {
            reason: reason.into(),
        }
    }

    pub fn runtime(
        capability: &'static str,
        language: &LanguageCode,
        message: impl Into<String>,
    ) -> Self {
        Self::Runtime {
            capability,
            language: language.clone(),
            message: message.into(),
        }
    }

    /// Converts a caught panic payload into an error.
    pub fn panicked(capability: &'static str, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked {
            capability,
            message,
        }
    }
}
