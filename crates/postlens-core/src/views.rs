use polars::prelude::*;

use crate::types::{FeatureRow, KeywordCount, Post};

fn utc_micros_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, Some(polars::prelude::TimeZone::UTC))
}

pub fn post_frame(posts: &[Post]) -> PolarsResult<DataFrame> {
    let created_at = Series::new(
        "created_at".into(),
        posts
            .iter()
            .map(|post| post.created_at.timestamp_micros())
            .collect::<Vec<_>>(),
    )
    .cast(&utc_micros_dtype())?;
    let last_updated = Series::new(
        "last_updated".into(),
        posts
            .iter()
            .map(|post| post.last_updated.map(|ts| ts.timestamp_micros()))
            .collect::<Vec<_>>(),
    )
    .cast(&utc_micros_dtype())?;

    DataFrame::new(vec![
        Series::new(
            "id".into(),
            posts.iter().map(|post| post.id.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "title".into(),
            posts.iter().map(|post| post.title.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        created_at.into(),
        Series::new(
            "url".into(),
            posts.iter().map(|post| post.url.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "text".into(),
            posts.iter().map(|post| post.text.as_deref()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "flair".into(),
            posts.iter().map(|post| post.flair.as_deref()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "score".into(),
            posts.iter().map(|post| post.score).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "upvote_ratio".into(),
            posts.iter().map(|post| post.upvote_ratio).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "num_comments".into(),
            posts.iter().map(|post| post.num_comments).collect::<Vec<_>>(),
        )
        .into(),
        last_updated.into(),
    ])
}

fn feature_columns(rows: &[FeatureRow]) -> Vec<Column> {
    let keywords: Vec<String> = rows.iter().map(FeatureRow::joined_keywords).collect();

    vec![
        Series::new(
            "id".into(),
            rows.iter().map(|row| row.id.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "post_hour".into(),
            rows.iter().map(|row| row.post_hour.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "post_weekday".into(),
            rows.iter()
                .map(|row| row.post_weekday.as_str())
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "engagement_score".into(),
            rows.iter().map(|row| row.engagement_score).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "score_to_comments_ratio".into(),
            rows.iter()
                .map(|row| row.score_to_comments_ratio)
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "word_count".into(),
            rows.iter().map(|row| row.word_count as u64).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "text_length".into(),
            rows.iter().map(|row| row.text_length as u64).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "question_detected".into(),
            rows.iter().map(|row| row.question_detected).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "top_keywords".into(),
            keywords.iter().map(String::as_str).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "detected_language".into(),
            rows.iter()
                .map(|row| row.detected_language.as_str())
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "sentiment_score".into(),
            rows.iter().map(|row| row.sentiment_score).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "sentiment_analysis".into(),
            rows.iter()
                .map(|row| row.sentiment_analysis.as_str())
                .collect::<Vec<_>>(),
        )
        .into(),
    ]
}

pub fn feature_frame(rows: &[FeatureRow]) -> PolarsResult<DataFrame> {
    DataFrame::new(feature_columns(rows))
}

/// Post columns with the feature columns appended; `rows` must be aligned
/// with `posts`.
pub fn full_frame(posts: &[Post], rows: &[FeatureRow]) -> PolarsResult<DataFrame> {
    if let Some((post, row)) = posts.iter().zip(rows).find(|(post, row)| post.id != row.id) {
        return Err(PolarsError::ComputeError(
            format!("feature row {} is not aligned with post {}", row.id, post.id).into(),
        ));
    }

    let mut output = post_frame(posts)?;
    let features = feature_columns(rows);
    output.hstack_mut(&features[1..])?;
    Ok(output)
}

pub fn keyword_frame(keywords: &[KeywordCount]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Series::new(
            "keyword".into(),
            keywords
                .iter()
                .map(|entry| entry.keyword.as_str())
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "count".into(),
            keywords
                .iter()
                .map(|entry| entry.count as u64)
                .collect::<Vec<_>>(),
        )
        .into(),
    ])
}
