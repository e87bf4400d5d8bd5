use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use postlens_nlp::{detect_language, CapabilityRegistry, DetectedLanguage, LanguageCode};
use tracing::info_span;

use crate::keywords::{KeywordExtractor, KeywordOutcome};
use crate::sentiment::{SentimentOutcome, SentimentScorer};
use crate::types::{FeatureRow, Post};

/// A capability that failed while processing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    Keywords { language: LanguageCode, cause: String },
    Sentiment { language: LanguageCode, cause: String },
}

#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub row: FeatureRow,
    pub degradations: Vec<Degradation>,
    pub language_unknown: bool,
}

impl RowOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Derives the feature row for a single post. Pure given the post, the
/// shared registry and the run's timezone.
#[derive(Debug, Clone, Copy)]
pub struct RowFeatureComputer<'a> {
    registry: &'a CapabilityRegistry,
    timezone: Tz,
}

impl<'a> RowFeatureComputer<'a> {
    pub fn new(registry: &'a CapabilityRegistry, timezone: Tz) -> Self {
        Self { registry, timezone }
    }

    pub fn compute(&self, post: &Post) -> RowOutcome {
        let span = info_span!("row_features", post_id = %post.id);
        let _guard = span.enter();

        let text = post.text();
        let (post_hour, post_weekday) = local_time_labels(post.created_at, self.timezone);

        let language = detect_language(self.registry.detector(), text);
        let keywords = KeywordExtractor::new(self.registry).extract(text, &language);
        let sentiment = SentimentScorer::new(self.registry).score(text, &language);

        let mut degradations = Vec::new();
        if let (KeywordOutcome::Failed(err), Some(code)) = (&keywords, language.code()) {
            degradations.push(Degradation::Keywords {
                language: code.clone(),
                cause: err.to_string(),
            });
        }
        if let (SentimentOutcome::Failed(err), Some(code)) = (&sentiment, language.code()) {
            degradations.push(Degradation::Sentiment {
                language: code.clone(),
                cause: err.to_string(),
            });
        }

        let row = FeatureRow {
            id: post.id.clone(),
            post_hour,
            post_weekday,
            engagement_score: engagement_score(post.score, post.num_comments),
            score_to_comments_ratio: score_to_comments_ratio(post.score, post.num_comments),
            word_count: word_count(text),
            text_length: text_length(text),
            question_detected: question_detected(text),
            top_keywords: keywords.keywords(),
            detected_language: language.as_str().to_string(),
            sentiment_score: sentiment.score(),
            sentiment_analysis: sentiment.label().to_string(),
        };

        RowOutcome {
            row,
            degradations,
            language_unknown: matches!(language, DetectedLanguage::Unknown),
        }
    }
}

/// `HH:MM` and full weekday name of `created_at` in `timezone`.
pub fn local_time_labels(created_at: DateTime<Utc>, timezone: Tz) -> (String, String) {
    let local = created_at.with_timezone(&timezone);
    (
        local.format("%H:%M").to_string(),
        local.format("%A").to_string(),
    )
}

/// `score + num_comments`, saturating at the `i64` bounds.
pub fn engagement_score(score: i64, num_comments: u32) -> i64 {
    score.saturating_add(i64::from(num_comments))
}

pub fn score_to_comments_ratio(score: i64, num_comments: u32) -> Option<f64> {
    (num_comments > 0).then(|| score as f64 / f64::from(num_comments))
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

pub fn question_detected(text: &str) -> bool {
    text.contains('?')
}
