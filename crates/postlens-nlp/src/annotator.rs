use unicode_segmentation::UnicodeSegmentation;

use crate::errors::CapabilityError;
use crate::lexicon::{lexicon, LanguageLexicon};
use crate::model::{LanguageCode, PartOfSpeech, Token};

/// Tokenizes, tags and normalizes text for one language.
///
/// Failures should come back as [`CapabilityError`]; callers in the feature
/// pipeline also catch panics and record them against the row.
pub trait LinguisticAnnotator: Send + Sync {
    fn name(&self) -> &'static str;
    fn annotate(&self, text: &str) -> Result<Vec<Token>, CapabilityError>;
}

/// Rule-based annotator driven by the static lexicons.
///
/// Closed-class words come from the stopword list, verbs/adjectives/adverbs
/// from word lists and suffix rules, capitalised words in mid-sentence are
/// treated as proper nouns, and every other alphabetic word is a noun.
#[derive(Debug, Clone, Copy)]
pub struct LexiconAnnotator {
    lexicon: &'static LanguageLexicon,
}

const MIN_SUFFIX_STEM: usize = 3;

impl LexiconAnnotator {
    pub fn new(language: &LanguageCode) -> Result<Self, CapabilityError> {
        lexicon(language.as_str())
            .filter(|lexicon| lexicon.has_grammar())
            .map(|lexicon| Self { lexicon })
            .ok_or_else(|| CapabilityError::UnsupportedLanguage(language.clone()))
    }

    pub fn language(&self) -> &'static str {
        self.lexicon.code
    }

    fn tag(&self, surface: &str, lower: &str, sentence_start: bool) -> PartOfSpeech {
        if !surface.chars().all(char::is_alphanumeric) {
            return PartOfSpeech::Other;
        }
        if surface.chars().all(|c| c.is_numeric()) {
            return PartOfSpeech::Numeral;
        }
        if !surface.chars().all(char::is_alphabetic) {
            return PartOfSpeech::Other;
        }
        if self.lexicon.is_stopword(lower) {
            return PartOfSpeech::Function;
        }
        if self.lexicon.adjectives.contains(lower) {
            return PartOfSpeech::Adjective;
        }
        if self.lexicon.verbs.contains(lower) {
            return PartOfSpeech::Verb;
        }
        let starts_upper = surface.chars().next().is_some_and(char::is_uppercase);
        if starts_upper && !sentence_start {
            return PartOfSpeech::ProperNoun;
        }
        if has_suffix(lower, self.lexicon.adverb_suffixes) {
            PartOfSpeech::Adverb
        } else if has_suffix(lower, self.lexicon.verb_suffixes) {
            PartOfSpeech::Verb
        } else if has_suffix(lower, self.lexicon.adjective_suffixes) {
            PartOfSpeech::Adjective
        } else {
            PartOfSpeech::Noun
        }
    }
}

impl LinguisticAnnotator for LexiconAnnotator {
    fn name(&self) -> &'static str {
        "lexicon_annotator_v1"
    }

    fn annotate(&self, text: &str) -> Result<Vec<Token>, CapabilityError> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;

        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                continue;
            }
            if segment.chars().all(|c| !c.is_alphanumeric()) {
                if segment.contains(&['.', '!', '?'][..]) {
                    sentence_start = true;
                }
                tokens.push(Token {
                    text: segment.to_string(),
                    lemma: segment.to_string(),
                    pos: PartOfSpeech::Punctuation,
                    is_stop: false,
                    is_alpha: false,
                });
                continue;
            }

            let lower = segment.to_lowercase();
            let pos = self.tag(segment, &lower, sentence_start);
            tokens.push(Token {
                text: segment.to_string(),
                is_stop: self.lexicon.is_stopword(&lower),
                is_alpha: segment.chars().all(char::is_alphabetic),
                lemma: lower,
                pos,
            });
            sentence_start = false;
        }

        Ok(tokens)
    }
}

fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| {
        word.ends_with(suffix) && word.chars().count() >= suffix.chars().count() + MIN_SUFFIX_STEM
    })
}
