use chrono_tz::Tz;
use polars::prelude::{DataFrame, PolarsResult};
use postlens_nlp::CapabilityRegistry;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::{CorpusAggregator, KeywordFilter};
use crate::features::{RowFeatureComputer, RowOutcome};
use crate::types::{FeatureRow, KeywordCount, Post};
use crate::views;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Lisbon;
pub const DEFAULT_TOP_N: usize = 30;

/// Per-invocation parameters, kept out of the pipeline so one instance can
/// serve several configurations.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub timezone: Tz,
    pub top_n: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub degraded: usize,
    pub undetected: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub timezone: Tz,
    pub posts: Vec<Post>,
    pub rows: Vec<FeatureRow>,
    pub keywords: Vec<KeywordCount>,
    pub summary: RunSummary,
}

impl PipelineOutput {
    /// Every post field followed by every feature field (minus the repeated id).
    pub fn full_view(&self) -> PolarsResult<DataFrame> {
        views::full_frame(&self.posts, &self.rows)
    }

    pub fn feature_view(&self) -> PolarsResult<DataFrame> {
        views::feature_frame(&self.rows)
    }

    pub fn keyword_view(&self) -> PolarsResult<DataFrame> {
        views::keyword_frame(&self.keywords)
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: CapabilityRegistry,
    aggregator: CorpusAggregator,
}

impl Pipeline {
    pub fn new(registry: CapabilityRegistry, filter: KeywordFilter) -> Self {
        Self {
            registry,
            aggregator: CorpusAggregator::new(filter),
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Computes every feature row, then aggregates keywords over the full set.
    pub fn run(&self, posts: Vec<Post>, options: &RunOptions) -> PipelineOutput {
        let computer = RowFeatureComputer::new(&self.registry, options.timezone);

        let outcomes: Vec<RowOutcome> = posts.par_iter().map(|post| computer.compute(post)).collect();

        let mut summary = RunSummary {
            processed: outcomes.len(),
            degraded: 0,
            undetected: 0,
        };
        let mut rows = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if outcome.is_degraded() {
                summary.degraded += 1;
                warn!(
                    post_id = %outcome.row.id,
                    degradations = ?outcome.degradations,
                    "row completed with degraded features"
                );
            }
            if outcome.language_unknown {
                summary.undetected += 1;
            }
            rows.push(outcome.row);
        }

        let keywords = self.aggregator.aggregate(&rows, options.top_n);

        info!(
            processed = summary.processed,
            degraded = summary.degraded,
            undetected = summary.undetected,
            keywords = keywords.len(),
            timezone = %options.timezone,
            "feature pipeline finished"
        );

        PipelineOutput {
            timezone: options.timezone,
            posts,
            rows,
            keywords,
            summary,
        }
    }
}
