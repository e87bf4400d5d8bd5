mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{
    post, pt_registry, FailingAnnotator, FixedDetector, PanickingAnnotator, PanickingDetector,
    PanickingSentiment, WordAnnotator, PT_STOPWORDS,
};
use postlens_core::aggregate::KeywordFilter;
use postlens_core::nlp::{CapabilityRegistry, LanguageCode};
use postlens_core::pipeline::{Pipeline, RunOptions, RunSummary};
use postlens_core::types::{KeywordCount, FEATURE_COLUMNS, POST_COLUMNS};

fn praia_posts() -> Vec<postlens_core::types::Post> {
    vec![
        post("p1", Some("A praia está linda"), 10, 2),
        post("p2", Some("Fui à praia de manhã"), 3, 0),
        post("p3", None, 1, 1),
    ]
}

#[test]
fn keyword_shared_by_two_posts_tops_the_corpus() {
    let pipeline = Pipeline::new(pt_registry(), KeywordFilter::default());
    let options = RunOptions {
        top_n: 1,
        ..RunOptions::default()
    };

    let output = pipeline.run(praia_posts(), &options);

    assert_eq!(output.keywords, vec![KeywordCount::new("praia", 2)]);
    assert_eq!(output.rows.len(), 3);
    assert_eq!(
        output.summary,
        RunSummary {
            processed: 3,
            degraded: 0,
            undetected: 1,
        }
    );
}

#[test]
fn rows_keep_input_order_and_reruns_are_identical() {
    let pipeline = Pipeline::new(pt_registry(), KeywordFilter::default());
    let options = RunOptions::default();

    let first = pipeline.run(praia_posts(), &options);
    let second = pipeline.run(praia_posts(), &options);

    let ids: Vec<&str> = first.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.keywords, second.keywords);
}

#[test]
fn failing_annotator_counts_as_degraded_and_run_completes() {
    let pt = LanguageCode::new("pt");
    let registry = CapabilityRegistry::new(Arc::new(FixedDetector(Some("pt"))))
        .with_annotator(pt, Arc::new(FailingAnnotator));
    let pipeline = Pipeline::new(registry, KeywordFilter::default());

    let output = pipeline.run(praia_posts(), &RunOptions::default());

    assert_eq!(output.summary.processed, 3);
    assert_eq!(output.summary.degraded, 2);
    assert!(output.keywords.is_empty());
    assert!(output.rows.iter().all(|row| row.top_keywords.is_empty()));
}

#[test]
fn panicking_capabilities_degrade_only_their_rows() {
    let pt = LanguageCode::new("pt");
    let registry = CapabilityRegistry::new(Arc::new(FixedDetector(Some("pt"))))
        .with_annotator(pt.clone(), Arc::new(PanickingAnnotator))
        .with_sentiment(pt, Arc::new(PanickingSentiment));
    let pipeline = Pipeline::new(registry, KeywordFilter::default());

    let output = pipeline.run(
        vec![
            post("ok1", Some("praia azul"), 1, 1),
            post("bad", Some("boom praia"), 1, 1),
            post("ok2", Some("praia sol"), 1, 1),
        ],
        &RunOptions::default(),
    );

    assert_eq!(output.summary.processed, 3);
    assert_eq!(output.summary.degraded, 3);
    assert!(output.rows[1].top_keywords.is_empty());
    assert!(output
        .rows
        .iter()
        .all(|row| row.sentiment_analysis == "unsupported" && row.sentiment_score.is_none()));
    assert_eq!(output.keywords[0], KeywordCount::new("praia", 2));
}

#[test]
fn panicking_detector_yields_unknown_language() {
    let registry = CapabilityRegistry::new(Arc::new(PanickingDetector));
    let pipeline = Pipeline::new(registry, KeywordFilter::default());

    let output = pipeline.run(praia_posts(), &RunOptions::default());

    assert_eq!(output.summary.undetected, 3);
    assert_eq!(output.summary.degraded, 0);
    assert!(output.rows.iter().all(|row| row.detected_language == "unknown"));
}

#[test]
fn empty_batch_produces_empty_outputs() -> Result<()> {
    let pipeline = Pipeline::new(pt_registry(), KeywordFilter::default());

    let output = pipeline.run(Vec::new(), &RunOptions::default());

    assert!(output.rows.is_empty());
    assert!(output.keywords.is_empty());
    assert_eq!(output.feature_view()?.height(), 0);
    assert_eq!(output.keyword_view()?.height(), 0);
    Ok(())
}

#[test]
fn views_expose_the_expected_columns() -> Result<()> {
    let registry = CapabilityRegistry::new(Arc::new(FixedDetector(Some("pt")))).with_annotator(
        LanguageCode::new("pt"),
        Arc::new(WordAnnotator {
            stopwords: PT_STOPWORDS,
        }),
    );
    let pipeline = Pipeline::new(registry, KeywordFilter::default());
    let output = pipeline.run(praia_posts(), &RunOptions::default());

    let features = output.feature_view()?;
    let names: Vec<String> = features
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, FEATURE_COLUMNS.to_vec());
    assert_eq!(features.height(), 3);

    let full = output.full_view()?;
    assert_eq!(full.width(), POST_COLUMNS.len() + FEATURE_COLUMNS.len() - 1);
    assert_eq!(full.height(), 3);

    let keywords = output.keyword_view()?;
    assert_eq!(keywords.column("keyword")?.str()?.get(0), Some("praia"));
    assert_eq!(keywords.column("count")?.u64()?.get(0), Some(2));

    let languages = features.column("detected_language")?.str()?;
    assert_eq!(languages.get(2), Some("unknown"));
    Ok(())
}
