// src/collect/sources/twitter.rs
// X/Twitter is declared in the sources config but has no implementation
// (it would need API credentials). Kept as an explicit no-op source so the
// run reports show it was considered and skipped.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::collect::types::NewsSource;
use crate::model::NewsItem;

pub struct TwitterSource {
    accounts: Vec<String>,
}

impl TwitterSource {
    pub fn new(accounts: Vec<String>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl NewsSource for TwitterSource {
    async fn fetch_latest(&self, _now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        tracing::debug!(
            accounts = self.accounts.len(),
            "X/Twitter source is not implemented; skipping"
        );
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "X/Twitter"
    }
}
