use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::aggregate::{KeywordFilter, MIN_KEYWORD_LENGTH};
use crate::error::ConfigError;
use crate::pipeline::{RunOptions, DEFAULT_TOP_N};
use crate::store::{OutputTables, DEFAULT_FEATURE_TABLE, DEFAULT_KEYWORD_TABLE};

/// Analyzer settings, read from an optional TOML file. Every field has a
/// default so an empty file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub timezone: String,
    pub top_n: usize,
    pub feature_table: String,
    pub keyword_table: String,
    pub csv_path: PathBuf,
    pub parquet_path: Option<PathBuf>,
    pub refresh_window_days: i64,
    pub keyword_filter: KeywordFilterConfig,
}

/// Extra keyword filtering on top of the built-in rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordFilterConfig {
    pub min_length: usize,
    pub denylist: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Lisbon".to_string(),
            top_n: DEFAULT_TOP_N,
            feature_table: DEFAULT_FEATURE_TABLE.to_string(),
            keyword_table: DEFAULT_KEYWORD_TABLE.to_string(),
            csv_path: PathBuf::from("Merged_Sample.csv"),
            parquet_path: None,
            refresh_window_days: 2,
            keyword_filter: KeywordFilterConfig::default(),
        }
    }
}

impl Default for KeywordFilterConfig {
    fn default() -> Self {
        Self {
            min_length: MIN_KEYWORD_LENGTH,
            denylist: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn run_options(&self) -> Result<RunOptions, ConfigError> {
        Ok(RunOptions {
            timezone: parse_timezone(&self.timezone)?,
            top_n: self.top_n,
        })
    }

    pub fn keyword_filter(&self) -> Result<KeywordFilter, ConfigError> {
        if self.keyword_filter.min_length < MIN_KEYWORD_LENGTH {
            return Err(ConfigError::MinLengthTooSmall {
                value: self.keyword_filter.min_length,
                minimum: MIN_KEYWORD_LENGTH,
            });
        }
        Ok(KeywordFilter::new(
            self.keyword_filter.min_length,
            self.keyword_filter.denylist.as_slice(),
        )?)
    }

    pub fn output_tables(&self) -> OutputTables {
        OutputTables {
            features: self.feature_table.clone(),
            keywords: self.keyword_table.clone(),
        }
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}
