// crates/postlens-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid table name '{0}'")]
    InvalidTableName(String),

    #[error("post {id} has an unreadable {field} value '{value}'")]
    InvalidTimestamp {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("post {id} has invalid {field}: {message}")]
    InvalidRow {
        id: String,
        field: &'static str,
        message: String,
    },

    #[error("refresh window of {days} days is negative or out of range")]
    InvalidWindow { days: i64 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("invalid keyword denylist pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("keyword_filter.min_length {value} is below the minimum of {minimum}")]
    MinLengthTooSmall { value: usize, minimum: usize },
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
