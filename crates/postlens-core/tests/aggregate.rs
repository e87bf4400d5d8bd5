use postlens_core::aggregate::{CorpusAggregator, KeywordFilter};
use postlens_core::types::{FeatureRow, KeywordCount};

fn row(id: &str, keywords: &[&str]) -> FeatureRow {
    FeatureRow {
        id: id.to_string(),
        post_hour: "12:00".to_string(),
        post_weekday: "Monday".to_string(),
        engagement_score: 0,
        score_to_comments_ratio: None,
        word_count: 0,
        text_length: 0,
        question_detected: false,
        top_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        detected_language: "pt".to_string(),
        sentiment_score: None,
        sentiment_analysis: "unsupported".to_string(),
    }
}

#[test]
fn shared_keyword_is_counted_once_per_row() {
    let rows = vec![row("a", &["praia", "sol"]), row("b", &["praia"])];

    let top = CorpusAggregator::default().aggregate(&rows, 1);

    assert_eq!(top, vec![KeywordCount::new("praia", 2)]);
}

#[test]
fn ties_keep_first_seen_order() {
    let rows = vec![
        row("a", &["zebra", "apple"]),
        row("b", &["mango", "apple"]),
        row("c", &["zebra", "mango"]),
        row("d", &["kiwi"]),
    ];

    let top = CorpusAggregator::default().aggregate(&rows, 10);

    assert_eq!(
        top,
        vec![
            KeywordCount::new("zebra", 2),
            KeywordCount::new("apple", 2),
            KeywordCount::new("mango", 2),
            KeywordCount::new("kiwi", 1),
        ]
    );
}

#[test]
fn default_filter_drops_short_and_quote_only_tokens() {
    let rows = vec![row("a", &["x", "\"\"", "'", " mar ", "\\\\", "ok"])];

    let top = CorpusAggregator::default().aggregate(&rows, 10);

    assert_eq!(
        top,
        vec![KeywordCount::new("mar", 1), KeywordCount::new("ok", 1)]
    );
}

#[test]
fn custom_filter_applies_length_and_denylist() {
    let filter = KeywordFilter::new(4, &["^test"]).expect("valid pattern");
    assert!(!filter.allows("sol"));
    assert!(!filter.allows("testing"));
    assert!(filter.allows("praia"));

    let rows = vec![row("a", &["sol", "testing", "praia"])];
    let top = CorpusAggregator::new(filter).aggregate(&rows, 10);
    assert_eq!(top, vec![KeywordCount::new("praia", 1)]);
}

#[test]
fn invalid_denylist_pattern_is_rejected() {
    assert!(KeywordFilter::new(2, &["("]).is_err());
}

#[test]
fn top_n_truncates_and_zero_returns_nothing() {
    let rows = vec![
        row("a", &["um", "dois", "tres"]),
        row("b", &["dois", "tres"]),
        row("c", &["tres"]),
    ];
    let aggregator = CorpusAggregator::default();

    assert_eq!(
        aggregator.aggregate(&rows, 2),
        vec![KeywordCount::new("tres", 3), KeywordCount::new("dois", 2)]
    );
    assert!(aggregator.aggregate(&rows, 0).is_empty());
    assert!(aggregator.aggregate(&[], 5).is_empty());
}

#[test]
fn base_rules_survive_a_permissive_filter() {
    let filter = KeywordFilter::new(1, &["^[0-9]+$"]).expect("valid pattern");
    let rows = vec![row("a", &["\"\"", "x", "praia", "2024"])];

    let top = CorpusAggregator::new(filter).aggregate(&rows, 10);

    assert_eq!(top, vec![KeywordCount::new("praia", 1)]);
}
