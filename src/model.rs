// src/model.rs
// Shared record types for every pipeline stage.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance tier, a pure function of the weighted score.
/// The serialized labels are the exact strings the report/digest
/// renderers and downstream consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "🔴 极重要")]
    Critical,
    #[serde(rename = "🟡 重要")]
    Important,
    #[serde(rename = "🟢 一般")]
    Normal,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Critical => "🔴 极重要",
            Category::Important => "🟡 重要",
            Category::Normal => "🟢 一般",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five rubric sub-scores, each 0..=5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub innovation: u8,
    pub impact: u8,
    pub verifiability: u8,
    pub attention: u8,
    pub timeliness: u8,
}

/// One news item, the single entity flowing through the pipeline.
///
/// Created by the collector with `importance_score = 0`; the scorer attaches
/// `importance_score`, `score_details` and `category`. Optional fields are
/// omitted from the JSON snapshots when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub title: String,
    /// Dedup key within a single collection run.
    pub url: String,
    /// ISO-8601 timestamp. Kept as a string so an unparseable value can
    /// still reach the timeliness rule (which scores it 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Blog entry summary, cleaned and capped at 500 chars at collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// arXiv paper abstract.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// arXiv category code (e.g. "cs.AI") for paper items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv_category: Option<String>,
    /// Hacker News points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// Hacker News comment count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
    #[serde(default)]
    pub importance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_details: Option<ScoreDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl NewsItem {
    /// Parsed publication time, if the `published` field holds a readable
    /// ISO-8601 timestamp. Naive timestamps are assumed UTC.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_deref().and_then(parse_published)
    }
}

pub fn parse_published(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|n| DateTime::from_naive_utc_and_offset(n, Utc))
}

/// Render a score with at least one decimal place and no further trailing
/// zeros ("20.0", "16.5", "16.75").
pub fn format_score(x: f64) -> String {
    let s = format!("{x:.2}");
    let trimmed = s.trim_end_matches('0');
    match trimmed.strip_suffix('.') {
        Some(whole) => format!("{whole}.0"),
        None => trimmed.to_string(),
    }
}

/// Truncate by characters, never bytes (titles and summaries carry CJK).
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
