// src/collect/mod.rs
pub mod config;
pub mod sources;
pub mod types;

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::model::NewsItem;
use types::{NewsSource, SourceReport};

/// Items older than this (relative to the run's `now`) are dropped by
/// every source.
pub fn freshness_window() -> Duration {
    Duration::hours(1)
}

pub fn is_fresh(published: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(published) <= freshness_window()
}

/// Normalize feed text: decode HTML entities, strip tags, collapse
/// whitespace, trim.
pub fn clean_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Keep the first occurrence of each URL, drop the rest.
pub fn dedup_by_url(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url.clone()))
        .collect()
}

#[derive(Debug)]
pub struct CollectOutcome {
    pub items: Vec<NewsItem>,
    pub reports: Vec<SourceReport>,
}

/// Run one collection pass over all sources, strictly sequentially.
/// Each source's outcome is captured as a report; a failure degrades that
/// source to zero items and never aborts the run.
pub async fn run_once(sources: &[Box<dyn NewsSource>], now: DateTime<Utc>) -> CollectOutcome {
    let mut raw = Vec::new();
    let mut reports = Vec::new();

    for source in sources {
        match source.fetch_latest(now).await {
            Ok(items) => {
                reports.push(SourceReport {
                    source: source.name().to_string(),
                    outcome: Ok(items.len()),
                });
                raw.extend(items);
            }
            Err(e) => {
                tracing::warn!(error = ?e, source = source.name(), "source fetch failed");
                reports.push(SourceReport {
                    source: source.name().to_string(),
                    outcome: Err(format!("{e:#}")),
                });
            }
        }
    }

    CollectOutcome {
        items: dedup_by_url(raw),
        reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    fn item(url: &str) -> NewsItem {
        NewsItem {
            source: "arXiv".into(),
            title: "t".into(),
            url: url.into(),
            ..Default::default()
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let out = dedup_by_url(vec![item("a"), item("b"), item("a")]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].url, "a");
        assert_eq!(out[1].url, "b");
    }

    #[test]
    fn freshness_is_a_one_hour_window() {
        let now = Utc::now();
        assert!(is_fresh(now - Duration::minutes(59), now));
        assert!(is_fresh(now, now));
        assert!(!is_fresh(now - Duration::minutes(61), now));
    }

    #[test]
    fn clean_text_strips_tags_and_entities() {
        let out = clean_text("  <p>Hello&nbsp;&amp;  <b>world</b></p>\n");
        assert_eq!(out, "Hello & world");
    }

    struct FixedSource(Vec<NewsItem>);

    #[async_trait::async_trait]
    impl NewsSource for FixedSource {
        async fn fetch_latest(&self, _now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
            Ok(self.0.clone())
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl NewsSource for FailingSource {
        async fn fetch_latest(&self, _now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
            Err(anyhow!("connection refused"))
        }
        fn name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn failed_source_does_not_abort_the_run() {
        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(FailingSource),
            Box::new(FixedSource(vec![item("https://example.org/1")])),
        ];
        let out = run_once(&sources, Utc::now()).await;
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.reports.len(), 2);
        assert!(out.reports[0].outcome.is_err());
        assert_eq!(out.reports[1].outcome.as_ref().unwrap(), &1);
    }
}
