// src/snapshot.rs
// JSON snapshot files — the only channel between pipeline stages.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::NewsItem;

/// Output of the collector stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub collected_at: String,
    pub total: usize,
    pub news: Vec<NewsItem>,
}

impl RawSnapshot {
    pub fn new(news: Vec<NewsItem>, now: DateTime<Utc>) -> Self {
        Self {
            collected_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            total: news.len(),
            news,
        }
    }
}

/// Output of the scorer stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSnapshot {
    pub processed_at: String,
    pub threshold: f64,
    pub total_raw: usize,
    pub total_filtered: usize,
    pub news: Vec<NewsItem>,
}

pub fn load_raw(path: &Path) -> Result<RawSnapshot> {
    load_json(path)
}

pub fn load_scored(path: &Path) -> Result<ScoredSnapshot> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot from {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("parsing snapshot {}", path.display()))
}

/// Whole-file replace, parent directories created on demand.
/// Not atomic: concurrent runs of one stage can race on the same path.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("writing snapshot to {}", path.display()))
}

/// Plain-text sibling of `save_json` for rendered messages and digests.
pub fn save_text(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}
