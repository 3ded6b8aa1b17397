// src/collect/sources/arxiv.rs
// arXiv Atom API client: one source instance per category code.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;

use crate::collect::types::NewsSource;
use crate::collect::{clean_text, is_fresh};
use crate::model::{parse_published, NewsItem};

const API_BASE: &str = "http://export.arxiv.org/api/query";
const MAX_RESULTS: &str = "50";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<String>,
    id: Option<String>,
    published: Option<String>,
    summary: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<Author>,
    #[serde(rename = "link", default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

pub struct ArxivSource {
    category: String,
    label: String,
    client: reqwest::Client,
}

impl ArxivSource {
    pub fn new(category: String) -> Self {
        Self {
            label: format!("arXiv {category}"),
            category,
            client: reqwest::Client::new(),
        }
    }
}

/// Parse an arXiv Atom document into fresh news items.
pub fn parse_entries(category: &str, xml: &str, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
    let feed: Feed = from_str(xml).context("parsing arxiv atom xml")?;

    let mut out = Vec::new();
    for entry in feed.entries {
        let Some(published) = entry.published.as_deref().and_then(parse_published) else {
            continue;
        };
        if !is_fresh(published, now) {
            continue;
        }

        // feedparser picks the rel=alternate link; fall back to <id>.
        let url = entry
            .links
            .iter()
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .and_then(|l| l.href.clone())
            .or(entry.id);
        let Some(url) = url else { continue };

        let title = clean_text(entry.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            continue;
        }

        out.push(NewsItem {
            source: "arXiv".to_string(),
            title,
            url,
            published: Some(published.to_rfc3339_opts(SecondsFormat::Secs, true)),
            abstract_text: entry
                .summary
                .as_deref()
                .map(clean_text)
                .filter(|s| !s.is_empty()),
            authors: entry.authors.into_iter().filter_map(|a| a.name).collect(),
            arxiv_category: Some(category.to_string()),
            ..Default::default()
        });
    }
    Ok(out)
}

#[async_trait]
impl NewsSource for ArxivSource {
    async fn fetch_latest(&self, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let query = format!("cat:{}", self.category);
        let body = self
            .client
            .get(API_BASE)
            .query(&[
                ("search_query", query.as_str()),
                ("start", "0"),
                ("max_results", MAX_RESULTS),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .timeout(HTTP_TIMEOUT)
            .send()
            .await
            .context("arxiv query")?
            .error_for_status()
            .context("arxiv http status")?
            .text()
            .await
            .context("arxiv response body")?;
        parse_entries(&self.category, &body, now)
    }

    fn name(&self) -> &str {
        &self.label
    }
}
