use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use serde::Serialize;
use tracing::info;

use crate::error::ExportError;
use crate::pipeline::PipelineOutput;
use crate::types::{FEATURE_COLUMNS, POST_COLUMNS};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const CSV_DELIMITER: u8 = b';';

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    title: &'a str,
    created_at: String,
    url: &'a str,
    text: Option<&'a str>,
    flair: Option<&'a str>,
    score: i64,
    upvote_ratio: f64,
    num_comments: u32,
    last_updated: Option<String>,
    post_hour: &'a str,
    post_weekday: &'a str,
    engagement_score: i64,
    score_to_comments_ratio: Option<f64>,
    word_count: usize,
    text_length: usize,
    question_detected: bool,
    top_keywords: String,
    detected_language: &'a str,
    sentiment_score: Option<f64>,
    sentiment_analysis: &'a str,
}

/// Header of the full export: post columns, then feature columns without the id.
pub fn export_columns() -> Vec<&'static str> {
    POST_COLUMNS
        .iter()
        .chain(FEATURE_COLUMNS.iter().skip(1))
        .copied()
        .collect()
}

/// Writes the full view as `;`-separated, fully quoted UTF-8 with a BOM.
/// Timestamps are rendered in the run's timezone.
pub fn write_full_csv<W: Write>(output: &PipelineOutput, mut writer: W) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(export_columns())?;

    for (post, row) in output.posts.iter().zip(&output.rows) {
        csv.serialize(ExportRow {
            id: &post.id,
            title: &post.title,
            created_at: post
                .created_at
                .with_timezone(&output.timezone)
                .to_rfc3339_opts(SecondsFormat::Secs, false),
            url: &post.url,
            text: post.text.as_deref(),
            flair: post.flair.as_deref(),
            score: post.score,
            upvote_ratio: post.upvote_ratio,
            num_comments: post.num_comments,
            last_updated: post
                .last_updated
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            post_hour: &row.post_hour,
            post_weekday: &row.post_weekday,
            engagement_score: row.engagement_score,
            score_to_comments_ratio: row.score_to_comments_ratio,
            word_count: row.word_count,
            text_length: row.text_length,
            question_detected: row.question_detected,
            top_keywords: row.joined_keywords(),
            detected_language: &row.detected_language,
            sentiment_score: row.sentiment_score,
            sentiment_analysis: &row.sentiment_analysis,
        })?;
    }

    csv.flush()?;
    Ok(())
}

pub fn export_full_csv(output: &PipelineOutput, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_full_csv(output, BufWriter::new(file))?;
    info!(path = %path.display(), rows = output.rows.len(), "wrote full CSV export");
    Ok(())
}

/// Writes the compact feature view as zstd-compressed Parquet.
pub fn export_features_parquet(output: &PipelineOutput, path: &Path) -> Result<(), ExportError> {
    let mut frame = output.feature_view()?;
    let file = File::create(path)?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .with_statistics(StatisticsOptions::default())
        .finish(&mut frame)?;
    info!(path = %path.display(), rows = frame.height(), "wrote feature parquet export");
    Ok(())
}
