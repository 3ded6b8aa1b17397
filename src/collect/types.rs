// src/collect/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::model::NewsItem;

/// A single upstream news source (one arXiv category, one blog feed,
/// the Hacker News firehose, ...). Sources apply their own freshness
/// filtering; `now` is passed in so parsers stay deterministic in tests.
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_latest(&self, now: DateTime<Utc>) -> Result<Vec<NewsItem>>;
    fn name(&self) -> &str;
}

/// Per-source outcome of one collection run. A failed source contributes
/// zero items and an `Err` here; it never aborts the run.
#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub outcome: Result<usize, String>,
}
