use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::{self, DbPool};
use crate::types::MetricsUpdate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub updated: usize,
    /// Updates for posts older than the refresh window or not in the store.
    pub skipped: usize,
}

/// Start of the refresh window ending at `now`.
pub fn window_start(now: DateTime<Utc>, window_days: i64) -> Result<DateTime<Utc>, StoreError> {
    if window_days < 0 {
        return Err(StoreError::InvalidWindow { days: window_days });
    }
    Duration::try_days(window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or(StoreError::InvalidWindow { days: window_days })
}

/// Apply metric snapshots to posts created within the last `window_days`.
pub async fn apply_metric_updates(
    pool: &DbPool,
    updates: &[MetricsUpdate],
    now: DateTime<Utc>,
    window_days: i64,
) -> Result<RefreshSummary, StoreError> {
    let since = window_start(now, window_days)?;
    let recent: HashSet<String> = store::recent_post_ids(pool, since)
        .await?
        .into_iter()
        .collect();

    let mut summary = RefreshSummary::default();
    for update in updates {
        if recent.contains(&update.id) && store::update_post_metrics(pool, update, now).await? {
            debug!(
                post_id = %update.id,
                score = update.score,
                num_comments = update.num_comments,
                "refreshed post metrics"
            );
            summary.updated += 1;
        } else {
            summary.skipped += 1;
        }
    }

    info!(
        updated = summary.updated,
        skipped = summary.skipped,
        window_days,
        "metric refresh finished"
    );
    Ok(summary)
}
