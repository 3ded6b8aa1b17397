// src/collect/sources/blogs.rs
// Blog feed client. RSS 2.0 first, Atom as a fallback (feeds in the wild
// are an even split).

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::collect::types::NewsSource;
use crate::collect::{clean_text, is_fresh};
use crate::model::{parse_published, truncate_chars, NewsItem};

/// At most this many entries are considered per feed per run.
const MAX_ENTRIES_PER_FEED: usize = 20;
const SUMMARY_CAP_CHARS: usize = 500;
const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    published: Option<String>,
    updated: Option<String>,
    summary: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// One entry in feed order, format differences already smoothed over.
#[derive(Debug)]
struct FeedEntry {
    title: String,
    link: String,
    published: Option<DateTime<Utc>>,
    summary: Option<String>,
}

fn parse_rfc2822(ts: &str) -> Option<DateTime<Utc>> {
    if let Some(dt) = OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    {
        return Some(dt);
    }
    // chrono accepts the obsolete zone names ("GMT", "EST", ...) that some
    // feeds still emit.
    DateTime::parse_from_rfc2822(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    if let Ok(rss) = from_str::<Rss>(xml) {
        return Ok(rss
            .channel
            .item
            .into_iter()
            .filter_map(|it| {
                Some(FeedEntry {
                    title: clean_text(it.title.as_deref()?),
                    link: it.link?,
                    published: it.pub_date.as_deref().and_then(parse_rfc2822),
                    summary: it.description,
                })
            })
            .collect());
    }
    if let Ok(atom) = from_str::<AtomFeed>(xml) {
        return Ok(atom
            .entries
            .into_iter()
            .filter_map(|e| {
                let link = e
                    .links
                    .iter()
                    .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
                    .and_then(|l| l.href.clone())?;
                Some(FeedEntry {
                    title: clean_text(e.title.as_deref()?),
                    link,
                    published: e
                        .published
                        .or(e.updated)
                        .as_deref()
                        .and_then(parse_published),
                    summary: e.summary,
                })
            })
            .collect());
    }
    Err(anyhow!("feed is neither RSS 2.0 nor Atom"))
}

/// Turn parsed feed entries into fresh news items for one blog.
/// Entries without a timestamp get a synthetic "30 minutes ago" so they
/// pass the freshness filter.
fn items_from_entries(
    blog_name: &str,
    entries: Vec<FeedEntry>,
    now: DateTime<Utc>,
) -> Vec<NewsItem> {
    let mut out = Vec::new();
    for entry in entries.into_iter().take(MAX_ENTRIES_PER_FEED) {
        let published = entry
            .published
            .unwrap_or_else(|| now - chrono::Duration::minutes(30));
        if !is_fresh(published, now) {
            continue;
        }
        if entry.title.is_empty() {
            continue;
        }
        let summary = entry
            .summary
            .as_deref()
            .map(clean_text)
            .filter(|s| !s.is_empty())
            .map(|s| truncate_chars(&s, SUMMARY_CAP_CHARS));
        out.push(NewsItem {
            source: blog_name.to_string(),
            title: entry.title,
            url: entry.link,
            published: Some(published.to_rfc3339_opts(SecondsFormat::Secs, true)),
            summary,
            ..Default::default()
        });
    }
    out
}

pub struct BlogSource {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl BlogSource {
    pub fn new(name: String, url: String) -> Self {
        Self {
            name,
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NewsSource for BlogSource {
    async fn fetch_latest(&self, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let body = self
            .client
            .get(&self.url)
            .timeout(HTTP_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("fetching feed {}", self.url))?
            .error_for_status()
            .context("feed http status")?
            .text()
            .await
            .context("feed body")?;
        let entries = parse_feed(&body).with_context(|| format!("parsing feed {}", self.url))?;
        Ok(items_from_entries(&self.name, entries, now))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS_FIXTURE: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Lab Blog</title>
  <item>
    <title>Introducing a &amp;new&amp; model</title>
    <link>https://example.org/new-model</link>
    <pubDate>Wed, 26 Aug 2026 11:45:00 GMT</pubDate>
    <description>&lt;p&gt;Weights released under an open license.&lt;/p&gt;</description>
  </item>
  <item>
    <title>No timestamp post</title>
    <link>https://example.org/undated</link>
  </item>
  <item>
    <title>Old post</title>
    <link>https://example.org/old</link>
    <pubDate>Mon, 24 Aug 2026 11:45:00 GMT</pubDate>
  </item>
</channel></rss>"#;

    #[test]
    fn rss_entries_filter_by_freshness_with_synthetic_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let entries = parse_feed(RSS_FIXTURE).unwrap();
        let items = items_from_entries("Lab Blog", entries, now);
        // Fresh item + undated item (synthetic 30min ago); old post dropped.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Introducing a &new& model");
        assert_eq!(
            items[0].summary.as_deref(),
            Some("Weights released under an open license.")
        );
        assert_eq!(items[1].url, "https://example.org/undated");
        assert_eq!(items[1].published.as_deref(), Some("2026-08-26T11:30:00Z"));
    }

    #[test]
    fn atom_fallback_parses() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Atom entry</title>
    <link href="https://example.org/atom" rel="alternate"/>
    <published>2026-08-26T11:50:00Z</published>
    <summary>Short note.</summary>
  </entry>
</feed>"#;
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let items = items_from_entries("Atom Blog", parse_feed(xml).unwrap(), now);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://example.org/atom");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_feed("not xml at all").is_err());
    }

    #[test]
    fn per_feed_cap_applies_before_freshness() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let entries: Vec<FeedEntry> = (0..30)
            .map(|i| FeedEntry {
                title: format!("post {i}"),
                link: format!("https://example.org/{i}"),
                published: None,
                summary: None,
            })
            .collect();
        let items = items_from_entries("Busy Blog", entries, now);
        assert_eq!(items.len(), MAX_ENTRIES_PER_FEED);
    }
}
