mod common;

use anyhow::Result;
use chrono::Duration;
use common::{at, post, pt_registry};
use postlens_core::aggregate::KeywordFilter;
use postlens_core::error::StoreError;
use postlens_core::pipeline::{Pipeline, RunOptions};
use postlens_core::refresh::{apply_metric_updates, window_start, RefreshSummary};
use postlens_core::store::{self, DbPool, OutputTables};
use postlens_core::types::{KeywordCount, MetricsUpdate};

async fn memory_pool() -> Result<DbPool> {
    let pool = store::connect("sqlite::memory:").await?;
    store::bootstrap(&pool).await?;
    Ok(pool)
}

#[tokio::test]
async fn inserted_posts_round_trip_and_duplicates_are_ignored() -> Result<()> {
    let pool = memory_pool().await?;
    let mut original = post("b2", Some("A praia está linda"), 12, 3);
    original.flair = Some("Viagem".to_string());
    original.last_updated = Some(at(2024, 7, 2, 8, 0));

    assert!(store::insert_post(&pool, &original).await?);
    assert!(store::insert_post(&pool, &post("a1", None, -1, 0)).await?);

    let mut changed = original.clone();
    changed.score = 999;
    assert!(!store::insert_post(&pool, &changed).await?);

    let posts = store::load_posts(&pool).await?;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "a1");
    assert_eq!(posts[0].text, None);
    assert_eq!(posts[1], original);
    Ok(())
}

#[tokio::test]
async fn naive_timestamps_are_read_as_utc() -> Result<()> {
    let pool = memory_pool().await?;
    sqlx::query(
        "INSERT INTO posts (id, title, created_at, url, score, upvote_ratio, num_comments) \
         VALUES ('legacy', 'old', '2024-03-01 10:15:00', 'https://example.org', 5, 0.5, 2)",
    )
    .execute(&pool)
    .await?;

    let posts = store::load_posts(&pool).await?;
    assert_eq!(posts[0].created_at, at(2024, 3, 1, 10, 15));
    assert_eq!(posts[0].last_updated, None);
    Ok(())
}

#[tokio::test]
async fn unreadable_timestamp_is_reported_with_post_id() -> Result<()> {
    let pool = memory_pool().await?;
    sqlx::query("INSERT INTO posts (id, created_at) VALUES ('bad', 'yesterday')")
        .execute(&pool)
        .await?;

    let err = store::load_posts(&pool).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidTimestamp { ref id, field: "created_at", .. } if id == "bad"
    ));
    Ok(())
}

#[tokio::test]
async fn persisting_twice_replaces_previous_tables() -> Result<()> {
    let pool = memory_pool().await?;
    let pipeline = Pipeline::new(pt_registry(), KeywordFilter::default());
    let tables = OutputTables::default();

    let first = pipeline.run(
        vec![
            post("p1", Some("A praia está linda"), 10, 2),
            post("p2", Some("Fui à praia"), 3, 1),
        ],
        &RunOptions::default(),
    );
    store::persist_run(&pool, &tables, &first).await?;

    let second = pipeline.run(
        vec![post("p3", Some("O mar azul"), 1, 0)],
        &RunOptions::default(),
    );
    store::persist_run(&pool, &tables, &second).await?;

    let ids: Vec<(String,)> = sqlx::query_as("SELECT id FROM features ORDER BY id")
        .fetch_all(&pool)
        .await?;
    assert_eq!(ids, vec![("p3".to_string(),)]);

    let row: (String, Option<f64>, i64, String) = sqlx::query_as(
        "SELECT top_keywords, score_to_comments_ratio, question_detected, sentiment_analysis FROM features",
    )
    .fetch_one(&pool)
    .await?;
    assert_eq!(row.0, "azul, mar");
    assert_eq!(row.1, None);
    assert_eq!(row.2, 0);
    assert_eq!(row.3, "POS");

    let keywords: Vec<(String, i64)> =
        sqlx::query_as("SELECT keyword, count FROM top_keywords ORDER BY keyword")
            .fetch_all(&pool)
            .await?;
    assert_eq!(
        keywords,
        vec![("azul".to_string(), 1), ("mar".to_string(), 1)]
    );
    Ok(())
}

#[tokio::test]
async fn empty_keyword_list_still_creates_the_table() -> Result<()> {
    let pool = memory_pool().await?;
    store::replace_keywords(&pool, "top_keywords", &[KeywordCount::new("sol", 4)]).await?;
    store::replace_keywords(&pool, "top_keywords", &[]).await?;

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM top_keywords")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count.0, 0);
    Ok(())
}

#[tokio::test]
async fn table_names_are_validated() -> Result<()> {
    let pool = memory_pool().await?;

    let err = store::replace_features(&pool, "features; DROP TABLE posts", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTableName(_)));

    let err = store::replace_keywords(&pool, "1keywords", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTableName(_)));
    Ok(())
}

#[tokio::test]
async fn refresh_only_touches_posts_inside_the_window() -> Result<()> {
    let pool = memory_pool().await?;
    let now = at(2024, 7, 10, 12, 0);

    let mut fresh = post("fresh", Some("novo"), 1, 0);
    fresh.created_at = now - Duration::hours(20);
    let mut stale = post("stale", Some("velho"), 1, 0);
    stale.created_at = now - Duration::days(5);
    store::insert_post(&pool, &fresh).await?;
    store::insert_post(&pool, &stale).await?;

    let updates = vec![
        MetricsUpdate {
            id: "fresh".to_string(),
            score: 42,
            num_comments: 7,
            upvote_ratio: 0.97,
        },
        MetricsUpdate {
            id: "stale".to_string(),
            score: 100,
            num_comments: 50,
            upvote_ratio: 0.5,
        },
        MetricsUpdate {
            id: "missing".to_string(),
            score: 1,
            num_comments: 1,
            upvote_ratio: 1.0,
        },
    ];

    let summary = apply_metric_updates(&pool, &updates, now, 2).await?;
    assert_eq!(
        summary,
        RefreshSummary {
            updated: 1,
            skipped: 2,
        }
    );

    let posts = store::load_posts(&pool).await?;
    let fresh = posts.iter().find(|p| p.id == "fresh").expect("fresh post");
    assert_eq!(fresh.score, 42);
    assert_eq!(fresh.num_comments, 7);
    assert_eq!(fresh.last_updated, Some(now));

    let stale = posts.iter().find(|p| p.id == "stale").expect("stale post");
    assert_eq!(stale.score, 1);
    Ok(())
}

#[tokio::test]
async fn out_of_range_refresh_windows_are_errors() -> Result<()> {
    let pool = memory_pool().await?;
    let now = at(2024, 7, 10, 12, 0);

    for days in [-1, i64::MAX / 1000, i64::MAX] {
        let err = apply_metric_updates(&pool, &[], now, days)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidWindow { days: d } if d == days));
    }

    assert_eq!(window_start(now, 0)?, now);
    assert_eq!(window_start(now, 2)?, now - Duration::days(2));
    Ok(())
}

#[test]
fn timestamp_parsing_accepts_offsets_and_naive_values() {
    let expected = at(2024, 5, 4, 10, 0);
    assert_eq!(store::parse_timestamp("2024-05-04T10:00:00Z"), Some(expected));
    assert_eq!(
        store::parse_timestamp("2024-05-04T11:00:00+01:00"),
        Some(expected)
    );
    assert_eq!(store::parse_timestamp("2024-05-04 10:00:00"), Some(expected));
    assert_eq!(store::parse_timestamp(""), None);
    assert_eq!(store::parse_timestamp("not a date"), None);
    assert_eq!(
        store::format_timestamp(expected),
        "2024-05-04T10:00:00.000000Z"
    );
}
