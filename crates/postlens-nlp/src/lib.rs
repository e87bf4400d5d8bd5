pub mod annotator;
pub mod detector;
pub mod errors;
pub mod lexicon;
pub mod model;
mod registry;
pub mod sentiment;

pub use annotator::{LexiconAnnotator, LinguisticAnnotator};
pub use detector::{detect_language, LanguageDetector, StopwordDetector};
pub use errors::CapabilityError;
pub use model::{
    DetectedLanguage, LanguageCode, PartOfSpeech, SentimentPrediction, Token, UNKNOWN_LANGUAGE,
};
pub use registry::{
    builtin_capability_descriptors, CapabilityDescriptor, CapabilityRegistry,
    LanguageCapabilities,
};
pub use sentiment::{LexiconSentimentPredictor, SentimentPredictor};
