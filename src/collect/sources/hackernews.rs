// src/collect/sources/hackernews.rs
// Hacker News Firebase API: newest story ids, then one request per story.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::collect::is_fresh;
use crate::collect::types::NewsSource;
use crate::model::NewsItem;

const NEW_STORIES_URL: &str = "https://hacker-news.firebaseio.com/v0/newstories.json";
const MAX_STORIES: usize = 100;
const LIST_TIMEOUT: Duration = Duration::from_secs(10);
const STORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Case-insensitive substring match against the title decides whether a
/// story is AI-related at all.
const AI_KEYWORDS: &[&str] = &[
    "ai",
    "machine learning",
    "deep learning",
    "neural network",
    "gpt",
    "llm",
    "model",
    "openai",
    "anthropic",
    "google gemini",
];

pub fn title_is_ai_related(title: &str) -> bool {
    let lower = title.to_lowercase();
    AI_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[derive(Debug, Deserialize)]
struct HnStory {
    title: Option<String>,
    url: Option<String>,
    score: Option<u32>,
    descendants: Option<u32>,
    time: Option<i64>,
}

fn item_from_story(story: HnStory, now: DateTime<Utc>) -> Option<NewsItem> {
    let published = DateTime::<Utc>::from_timestamp(story.time?, 0)?;
    if !is_fresh(published, now) {
        return None;
    }
    let title = story.title?;
    if !title_is_ai_related(&title) {
        return None;
    }
    Some(NewsItem {
        source: "Hacker News".to_string(),
        title,
        url: story.url.unwrap_or_default(),
        published: Some(published.to_rfc3339_opts(SecondsFormat::Secs, true)),
        score: Some(story.score.unwrap_or(0)),
        comments: Some(story.descendants.unwrap_or(0)),
        ..Default::default()
    })
}

pub struct HackerNewsSource {
    client: reqwest::Client,
}

impl HackerNewsSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_story(&self, id: u64) -> Result<HnStory> {
        let url = format!("https://hacker-news.firebaseio.com/v0/item/{id}.json");
        self.client
            .get(&url)
            .timeout(STORY_TIMEOUT)
            .send()
            .await
            .context("hn story request")?
            .error_for_status()
            .context("hn story http status")?
            .json()
            .await
            .context("hn story body")
    }
}

impl Default for HackerNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for HackerNewsSource {
    async fn fetch_latest(&self, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let ids: Vec<u64> = self
            .client
            .get(NEW_STORIES_URL)
            .timeout(LIST_TIMEOUT)
            .send()
            .await
            .context("hn newstories request")?
            .error_for_status()
            .context("hn newstories http status")?
            .json()
            .await
            .context("hn newstories body")?;

        let mut out = Vec::new();
        for id in ids.into_iter().take(MAX_STORIES) {
            // One dead story must not take the rest of the batch down.
            let story = match self.fetch_story(id).await {
                Ok(story) => story,
                Err(e) => {
                    tracing::debug!(error = ?e, id, "skipping hn story");
                    continue;
                }
            };
            if let Some(item) = item_from_story(story, now) {
                out.push(item);
            }
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "Hacker News"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn story(title: &str, age_secs: i64, now: DateTime<Utc>) -> HnStory {
        HnStory {
            title: Some(title.to_string()),
            url: Some("https://example.org/story".to_string()),
            score: Some(12),
            descendants: Some(3),
            time: Some(now.timestamp() - age_secs),
        }
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        assert!(title_is_ai_related("Show HN: A new LLM playground"));
        assert!(title_is_ai_related("OPENAI ships something"));
        // "ai" matches as a plain substring, e.g. inside "maintain".
        assert!(title_is_ai_related("How we maintain our garden"));
        assert!(!title_is_ai_related("Postgres tuning notes"));
    }

    #[test]
    fn fresh_ai_story_becomes_an_item() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let item = item_from_story(story("A new AI model", 600, now), now).unwrap();
        assert_eq!(item.source, "Hacker News");
        assert_eq!(item.score, Some(12));
        assert_eq!(item.comments, Some(3));
    }

    #[test]
    fn stale_or_offtopic_or_undated_stories_are_dropped() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        assert!(item_from_story(story("A new AI model", 7200, now), now).is_none());
        assert!(item_from_story(story("Rust borrow checker tips", 600, now), now).is_none());
        let mut undated = story("A new AI model", 600, now);
        undated.time = None;
        assert!(item_from_story(undated, now).is_none());
    }

    #[test]
    fn story_without_url_keeps_empty_dedup_key() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let mut s = story("A new AI model", 60, now);
        s.url = None;
        let item = item_from_story(s, now).unwrap();
        assert_eq!(item.url, "");
    }
}
