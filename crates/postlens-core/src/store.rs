//! SQLite post store and the replace-on-write feature/keyword sinks.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, Pool, Sqlite, Transaction};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::pipeline::PipelineOutput;
use crate::types::{FeatureRow, KeywordCount, MetricsUpdate, Post};

pub type DbPool = Pool<Sqlite>;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://reddit_posts.db";
pub const DEFAULT_FEATURE_TABLE: &str = "features";
pub const DEFAULT_KEYWORD_TABLE: &str = "top_keywords";

/// Open (creating if needed) the SQLite database behind `database_url`.
///
/// In-memory databases are pinned to a single connection so every query sees
/// the same database.
pub async fn connect(database_url: &str) -> Result<DbPool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    debug!(database_url, "sqlite pool established");
    Ok(pool)
}

pub async fn bootstrap(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                title TEXT,
                created_at TEXT,
                url TEXT,
                text TEXT,
                flair TEXT,
                score INTEGER,
                upvote_ratio FLOAT,
                num_comments INTEGER,
                last_updated TIMESTAMP
            )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert a post; returns `false` when a post with the same id already exists.
pub async fn insert_post(pool: &DbPool, post: &Post) -> Result<bool, StoreError> {
    let last_updated = post.last_updated.unwrap_or_else(Utc::now);
    let result = sqlx::query(
        r#"
            INSERT INTO posts (id, title, created_at, url, text, flair, score, upvote_ratio, num_comments, last_updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(&post.id)
    .bind(&post.title)
    .bind(format_timestamp(post.created_at))
    .bind(&post.url)
    .bind(post.text.as_deref())
    .bind(post.flair.as_deref())
    .bind(post.score)
    .bind(post.upvote_ratio)
    .bind(post.num_comments)
    .bind(format_timestamp(last_updated))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

#[derive(Debug, FromRow)]
struct PostRecord {
    id: String,
    title: Option<String>,
    created_at: Option<String>,
    url: Option<String>,
    text: Option<String>,
    flair: Option<String>,
    score: Option<i64>,
    upvote_ratio: Option<f64>,
    num_comments: Option<i64>,
    last_updated: Option<String>,
}

impl TryFrom<PostRecord> for Post {
    type Error = StoreError;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        let raw_created = record.created_at.unwrap_or_default();
        let created_at =
            parse_timestamp(&raw_created).ok_or_else(|| StoreError::InvalidTimestamp {
                id: record.id.clone(),
                field: "created_at",
                value: raw_created.clone(),
            })?;
        let last_updated = match record.last_updated {
            Some(raw) => Some(parse_timestamp(&raw).ok_or_else(|| {
                StoreError::InvalidTimestamp {
                    id: record.id.clone(),
                    field: "last_updated",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let num_comments = u32::try_from(record.num_comments.unwrap_or(0)).map_err(|err| {
            StoreError::InvalidRow {
                id: record.id.clone(),
                field: "num_comments",
                message: err.to_string(),
            }
        })?;

        Ok(Post {
            id: record.id,
            title: record.title.unwrap_or_default(),
            created_at,
            url: record.url.unwrap_or_default(),
            text: record.text,
            flair: record.flair,
            score: record.score.unwrap_or(0),
            upvote_ratio: record.upvote_ratio.unwrap_or(0.0),
            num_comments,
            last_updated,
        })
    }
}

/// Every stored post, ordered by id.
pub async fn load_posts(pool: &DbPool) -> Result<Vec<Post>, StoreError> {
    let records: Vec<PostRecord> = sqlx::query_as(
        r#"
            SELECT id, title, created_at, url, text, flair, score, upvote_ratio, num_comments, last_updated
            FROM posts
            ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    records.into_iter().map(Post::try_from).collect()
}

/// Ids of posts created at or after `since`.
pub async fn recent_post_ids(
    pool: &DbPool,
    since: DateTime<Utc>,
) -> Result<Vec<String>, StoreError> {
    let rows: Vec<(String, Option<String>)> =
        sqlx::query_as("SELECT id, created_at FROM posts ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .filter(|(_, created_at)| {
            created_at
                .as_deref()
                .and_then(parse_timestamp)
                .is_some_and(|ts| ts >= since)
        })
        .map(|(id, _)| id)
        .collect())
}

/// Overwrite the engagement numbers of one post; `false` when it is unknown.
pub async fn update_post_metrics(
    pool: &DbPool,
    update: &MetricsUpdate,
    now: DateTime<Utc>,
) -> Result<bool, StoreError> {
    let result = sqlx::query(
        r#"
            UPDATE posts
            SET score = ?, num_comments = ?, upvote_ratio = ?, last_updated = ?
            WHERE id = ?
        "#,
    )
    .bind(update.score)
    .bind(update.num_comments)
    .bind(update.upvote_ratio)
    .bind(format_timestamp(now))
    .bind(&update.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Target table names for one persisted run.
#[derive(Debug, Clone)]
pub struct OutputTables {
    pub features: String,
    pub keywords: String,
}

impl Default for OutputTables {
    fn default() -> Self {
        Self {
            features: DEFAULT_FEATURE_TABLE.to_string(),
            keywords: DEFAULT_KEYWORD_TABLE.to_string(),
        }
    }
}

/// Replace the feature table with `rows`. Readers see either the previous or
/// the new table.
pub async fn replace_features(
    pool: &DbPool,
    table: &str,
    rows: &[FeatureRow],
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    write_features(&mut tx, table, rows).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn replace_keywords(
    pool: &DbPool,
    table: &str,
    keywords: &[KeywordCount],
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    write_keywords(&mut tx, table, keywords).await?;
    tx.commit().await?;
    Ok(())
}

/// Replace both output tables inside a single transaction.
pub async fn persist_run(
    pool: &DbPool,
    tables: &OutputTables,
    output: &PipelineOutput,
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    write_features(&mut tx, &tables.features, &output.rows).await?;
    write_keywords(&mut tx, &tables.keywords, &output.keywords).await?;
    tx.commit().await?;
    info!(
        features = %tables.features,
        keywords = %tables.keywords,
        rows = output.rows.len(),
        keyword_count = output.keywords.len(),
        "replaced feature and keyword tables"
    );
    Ok(())
}

async fn write_features(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    rows: &[FeatureRow],
) -> Result<(), StoreError> {
    let table = validate_table_name(table)?;

    let drop_sql = format!("DROP TABLE IF EXISTS {table}");
    sqlx::query(&drop_sql).execute(&mut **tx).await?;

    let create = format!(
        r#"
            CREATE TABLE {table} (
                id TEXT,
                post_hour TEXT,
                post_weekday TEXT,
                engagement_score INTEGER,
                score_to_comments_ratio REAL,
                word_count INTEGER,
                text_length INTEGER,
                question_detected INTEGER,
                top_keywords TEXT,
                detected_language TEXT,
                sentiment_score REAL,
                sentiment_analysis TEXT
            )
        "#
    );
    sqlx::query(&create).execute(&mut **tx).await?;

    let insert = format!(
        "INSERT INTO {table} (id, post_hour, post_weekday, engagement_score, score_to_comments_ratio, \
         word_count, text_length, question_detected, top_keywords, detected_language, \
         sentiment_score, sentiment_analysis) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    for row in rows {
        sqlx::query(&insert)
            .bind(&row.id)
            .bind(&row.post_hour)
            .bind(&row.post_weekday)
            .bind(row.engagement_score)
            .bind(row.score_to_comments_ratio)
            .bind(row.word_count as i64)
            .bind(row.text_length as i64)
            .bind(row.question_detected)
            .bind(row.joined_keywords())
            .bind(&row.detected_language)
            .bind(row.sentiment_score)
            .bind(&row.sentiment_analysis)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn write_keywords(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    keywords: &[KeywordCount],
) -> Result<(), StoreError> {
    let table = validate_table_name(table)?;

    let drop_sql = format!("DROP TABLE IF EXISTS {table}");
    sqlx::query(&drop_sql).execute(&mut **tx).await?;

    let create = format!("CREATE TABLE {table} (keyword TEXT, count INTEGER)");
    sqlx::query(&create).execute(&mut **tx).await?;

    let insert = format!("INSERT INTO {table} (keyword, count) VALUES (?, ?)");
    for entry in keywords {
        sqlx::query(&insert)
            .bind(&entry.keyword)
            .bind(entry.count as i64)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn validate_table_name(name: &str) -> Result<&str, StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse RFC 3339 or naive ISO-8601 text (space or `T` separated). Naive
/// values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = raw.trim().replacen(' ', "T", 1);
    if normalized.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(ts.with_timezone(&Utc));
    }
    normalized
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}
