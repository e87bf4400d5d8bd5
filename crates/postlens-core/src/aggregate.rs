use std::collections::hash_map::Entry;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{FeatureRow, KeywordCount};

/// Tokens made only of quotes or backslashes (including the empty token).
pub const BASE_DENYLIST: &str = r#"^["'\\]*$"#;
/// Shortest token ever counted; configuration can only raise it.
pub const MIN_KEYWORD_LENGTH: usize = 2;

static BASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(BASE_DENYLIST).expect("base denylist is a valid regex"));

/// Decides which flattened keyword tokens are counted.
///
/// The base rules (at least [`MIN_KEYWORD_LENGTH`] characters, not matching
/// [`BASE_DENYLIST`]) always apply; extra patterns only narrow the set.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    min_length: usize,
    denylist: Vec<Regex>,
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self {
            min_length: MIN_KEYWORD_LENGTH,
            denylist: vec![BASE_PATTERN.clone()],
        }
    }
}

impl KeywordFilter {
    /// `min_length` below [`MIN_KEYWORD_LENGTH`] is raised to it. `patterns`
    /// are appended to the base denylist.
    pub fn new<S: AsRef<str>>(min_length: usize, patterns: &[S]) -> Result<Self, regex::Error> {
        let mut denylist = vec![BASE_PATTERN.clone()];
        for pattern in patterns {
            denylist.push(Regex::new(pattern.as_ref())?);
        }
        Ok(Self {
            min_length: min_length.max(MIN_KEYWORD_LENGTH),
            denylist,
        })
    }

    pub fn allows(&self, token: &str) -> bool {
        token.chars().count() >= self.min_length
            && !self.denylist.iter().any(|pattern| pattern.is_match(token))
    }
}

/// Corpus-wide keyword frequencies over a complete batch of feature rows.
#[derive(Debug, Clone, Default)]
pub struct CorpusAggregator {
    filter: KeywordFilter,
}

impl CorpusAggregator {
    pub fn new(filter: KeywordFilter) -> Self {
        Self { filter }
    }

    /// The `top_n` most frequent keywords, descending by count. Equal counts
    /// keep the order in which the keywords were first seen.
    pub fn aggregate(&self, rows: &[FeatureRow], top_n: usize) -> Vec<KeywordCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        let tokens = rows
            .iter()
            .flat_map(|row| row.top_keywords.iter())
            .map(|keyword| keyword.trim())
            .filter(|keyword| self.filter.allows(keyword));

        for token in tokens {
            match counts.entry(token) {
                Entry::Occupied(mut entry) => *entry.get_mut() += 1,
                Entry::Vacant(entry) => {
                    entry.insert(1);
                    first_seen.push(token);
                }
            }
        }

        let mut ranked: Vec<KeywordCount> = first_seen
            .into_iter()
            .map(|keyword| KeywordCount::new(keyword, counts[keyword]))
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(top_n);
        ranked
    }
}
