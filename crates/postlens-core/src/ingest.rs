use std::io::BufRead;

use serde::de::DeserializeOwned;

use crate::error::ImportError;
use crate::types::{MetricsUpdate, Post};

/// Reads one JSON document per line, skipping blank lines. Errors carry the
/// 1-based line number.
pub fn read_jsonl<T: DeserializeOwned, R: BufRead>(reader: R) -> Result<Vec<T>, ImportError> {
    let mut items = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(&line).map_err(|source| ImportError::Json {
            line: index + 1,
            source,
        })?;
        items.push(item);
    }
    Ok(items)
}

pub fn read_posts<R: BufRead>(reader: R) -> Result<Vec<Post>, ImportError> {
    read_jsonl(reader)
}

pub fn read_metric_updates<R: BufRead>(reader: R) -> Result<Vec<MetricsUpdate>, ImportError> {
    read_jsonl(reader)
}
