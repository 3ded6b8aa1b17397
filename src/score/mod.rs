// src/score/mod.rs
// The importance rubric: five sub-scores (0..=5), weighted sum, category
// tiers, threshold filter.

pub mod keywords;

use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::path::Path;

use crate::model::{truncate_chars, Category, NewsItem, ScoreDetails};
use crate::snapshot::{self, ScoredSnapshot};
use keywords::ScoreKeywords;

pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// Nominal rubric maximum; the weighted sum is clamped here so every score
/// lives on the advertised /20 scale.
const SCORE_CAP: f64 = 20.0;

const W_INNOVATION: f64 = 2.0;
const W_IMPACT: f64 = 1.5;
const W_VERIFIABILITY: f64 = 1.0;
const W_ATTENTION: f64 = 1.0;
const W_TIMELINESS: f64 = 0.5;

/// Category is a pure threshold function of the weighted score;
/// boundaries go to the higher tier.
pub fn classify(score: f64) -> Category {
    if score >= 15.0 {
        Category::Critical
    } else if score >= 10.0 {
        Category::Important
    } else {
        Category::Normal
    }
}

/// Keyword matching always runs on the lowercased title plus the summary
/// truncated to 500 chars.
fn match_text(item: &NewsItem) -> String {
    let summary = truncate_chars(item.summary.as_deref().unwrap_or(""), 500);
    format!("{} {}", item.title.to_lowercase(), summary.to_lowercase())
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| text.contains(&kw.to_lowercase()))
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    keywords: ScoreKeywords,
}

impl Scorer {
    pub fn new(keywords: ScoreKeywords) -> Self {
        Self { keywords }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoreKeywords::default_seed())
    }

    /// Compute the weighted importance score and its sub-scores. Pure in
    /// the item, keyword config and `now`.
    pub fn score_item(&self, item: &NewsItem, now: DateTime<Utc>) -> (f64, ScoreDetails) {
        let text = match_text(item);
        let details = ScoreDetails {
            innovation: self.innovation(&text, item),
            impact: self.impact(&text),
            verifiability: self.verifiability(item),
            attention: attention(item),
            timeliness: timeliness(item, now),
        };
        let total = f64::from(details.innovation) * W_INNOVATION
            + f64::from(details.impact) * W_IMPACT
            + f64::from(details.verifiability) * W_VERIFIABILITY
            + f64::from(details.attention) * W_ATTENTION
            + f64::from(details.timeliness) * W_TIMELINESS;
        (round2(total).clamp(0.0, SCORE_CAP), details)
    }

    /// Breakthrough keyword short-circuits at 5; the lower tiers combine
    /// by max.
    fn innovation(&self, text: &str, item: &NewsItem) -> u8 {
        if contains_any(text, &self.keywords.breakthrough) {
            return 5;
        }
        let mut score = 0u8;
        if contains_any(text, &self.keywords.model_release) {
            score = 4;
        }
        if contains_any(text, &self.keywords.research) {
            score = score.max(3);
        }
        if item.source == "arXiv" {
            score = score.max(2);
        }
        score
    }

    /// First match wins, no combination.
    fn impact(&self, text: &str) -> u8 {
        if contains_any(text, &self.keywords.open_source) {
            5
        } else if contains_any(text, &self.keywords.magnitude) {
            4
        } else if contains_any(text, &self.keywords.emergent) {
            3
        } else if contains_any(text, &self.keywords.improvement) {
            2
        } else {
            0
        }
    }

    fn verifiability(&self, item: &NewsItem) -> u8 {
        let trusted = self
            .keywords
            .trusted_domains
            .iter()
            .any(|d| item.url.contains(d.as_str()) || *d == item.source);
        if trusted || item.source == "arXiv" {
            5
        } else if self
            .keywords
            .code_hosts
            .iter()
            .any(|d| item.url.contains(d.as_str()))
        {
            4
        } else if item.summary.as_deref().is_some_and(|s| !s.is_empty()) {
            3
        } else {
            1
        }
    }
}

/// Hacker News items get a step function over points/comments; everything
/// else has no engagement data and scores a flat 2.
fn attention(item: &NewsItem) -> u8 {
    if item.source != "Hacker News" {
        return 2;
    }
    let points = item.score.unwrap_or(0);
    let comments = item.comments.unwrap_or(0);
    if points > 500 || comments > 200 {
        5
    } else if points > 200 || comments > 100 {
        4
    } else if points > 100 || comments > 50 {
        3
    } else if points > 50 || comments > 20 {
        2
    } else {
        1
    }
}

/// Step function over item age; missing or unparseable timestamps score 1.
fn timeliness(item: &NewsItem, now: DateTime<Utc>) -> u8 {
    let Some(published) = item.published_at() else {
        return 1;
    };
    let age = now.signed_duration_since(published);
    if age <= Duration::minutes(30) {
        5
    } else if age <= Duration::hours(1) {
        4
    } else if age <= Duration::hours(6) {
        3
    } else if age <= Duration::hours(24) {
        2
    } else {
        1
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug)]
pub struct FilterOutcome {
    pub total_raw: usize,
    pub filtered: Vec<NewsItem>,
}

impl Scorer {
    /// Score every item (sub-scores are computed regardless of filtering),
    /// keep those at or above the threshold, sorted descending by score.
    pub fn filter_and_score(
        &self,
        items: Vec<NewsItem>,
        threshold: f64,
        now: DateTime<Utc>,
    ) -> FilterOutcome {
        let total_raw = items.len();
        let mut filtered: Vec<NewsItem> = items
            .into_iter()
            .filter_map(|mut item| {
                let (total, details) = self.score_item(&item, now);
                item.importance_score = total;
                item.score_details = Some(details);
                item.category = Some(classify(total));
                (total >= threshold).then_some(item)
            })
            .collect();
        filtered.sort_by(|a, b| b.importance_score.total_cmp(&a.importance_score));
        FilterOutcome {
            total_raw,
            filtered,
        }
    }
}

/// The scorer stage: raw snapshot in, scored snapshot out.
pub fn run_stage(
    input: &Path,
    output: &Path,
    threshold: f64,
    scorer: &Scorer,
    now: DateTime<Utc>,
) -> Result<ScoredSnapshot> {
    let raw = snapshot::load_raw(input)?;
    let outcome = scorer.filter_and_score(raw.news, threshold, now);
    let snap = ScoredSnapshot {
        processed_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        threshold,
        total_raw: outcome.total_raw,
        total_filtered: outcome.filtered.len(),
        news: outcome.filtered,
    };
    snapshot::save_json(output, &snap)?;
    Ok(snap)
}
