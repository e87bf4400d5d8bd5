// crates/postlens-core/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingested submission as kept by the post store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub flair: Option<String>,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Post {
    /// Body text with a missing value read as the empty string.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Columns of the persisted feature table, in order.
pub const FEATURE_COLUMNS: [&str; 12] = [
    "id",
    "post_hour",
    "post_weekday",
    "engagement_score",
    "score_to_comments_ratio",
    "word_count",
    "text_length",
    "question_detected",
    "top_keywords",
    "detected_language",
    "sentiment_score",
    "sentiment_analysis",
];

pub const POST_COLUMNS: [&str; 10] = [
    "id",
    "title",
    "created_at",
    "url",
    "text",
    "flair",
    "score",
    "upvote_ratio",
    "num_comments",
    "last_updated",
];

/// Features derived from one post. Rebuilt wholesale on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub id: String,
    pub post_hour: String,
    pub post_weekday: String,
    pub engagement_score: i64,
    pub score_to_comments_ratio: Option<f64>,
    pub word_count: usize,
    pub text_length: usize,
    pub question_detected: bool,
    pub top_keywords: Vec<String>,
    pub detected_language: String,
    pub sentiment_score: Option<f64>,
    pub sentiment_analysis: String,
}

impl FeatureRow {
    /// Storage rendering of `top_keywords`.
    pub fn joined_keywords(&self) -> String {
        self.top_keywords.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

impl KeywordCount {
    pub fn new(keyword: impl Into<String>, count: usize) -> Self {
        Self {
            keyword: keyword.into(),
            count,
        }
    }
}

/// Fresh engagement numbers for an already stored post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricsUpdate {
    pub id: String,
    pub score: i64,
    pub num_comments: u32,
    pub upvote_ratio: f64,
}
