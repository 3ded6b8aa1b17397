// src/digest.rs
// Digest and per-item notification rendering. Deterministic formatting
// functions; all output goes back to the caller.

use chrono::{DateTime, Utc};

use crate::model::{format_score, truncate_chars, Category, NewsItem};

pub const DEFAULT_DIGEST_TITLE: &str = "AI 新闻速递";

/// The digest shows every critical item but caps the important section.
const MAX_IMPORTANT_IN_DIGEST: usize = 10;
const ABSTRACT_EXCERPT_CHARS: usize = 200;
const MAX_AUTHORS_SHOWN: usize = 3;

/// Full block for one item: category-tagged title, source, score, link,
/// and authors/abstract when present.
pub fn summarize_single(item: &NewsItem) -> String {
    let category = item.category.map(Category::label).unwrap_or_default();

    let mut parts = Vec::new();
    parts.push(format!("【{category}】{}", item.title));
    parts.push(format!("📍 来源：{}", item.source));
    parts.push(format!("⭐ 评分：{}/20", format_score(item.importance_score)));
    parts.push(format!("🔗 链接：{}", item.url));

    if !item.authors.is_empty() {
        let mut authors = item
            .authors
            .iter()
            .take(MAX_AUTHORS_SHOWN)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if item.authors.len() > MAX_AUTHORS_SHOWN {
            authors.push_str(&format!(" 等{}人", item.authors.len()));
        }
        parts.push(format!("👤 作者：{authors}"));
    }

    if let Some(abstract_text) = item.abstract_text.as_deref().filter(|s| !s.is_empty()) {
        let mut excerpt = truncate_chars(abstract_text, ABSTRACT_EXCERPT_CHARS);
        if abstract_text.chars().count() > ABSTRACT_EXCERPT_CHARS {
            excerpt.push_str("...");
        }
        parts.push(format!("📝 摘要：{excerpt}"));
    }

    parts.join("\n")
}

/// Markdown digest over a scored item list: all critical items in full,
/// then up to 10 important ones.
pub fn generate_digest(news: &[NewsItem], title: &str, now: DateTime<Utc>) -> String {
    if news.is_empty() {
        return format!("# {title}\n\n暂无重要新闻。\n");
    }

    let mut digest = format!("# {title}\n");
    digest.push_str(&format!("📅 {}\n", now.format("%Y-%m-%d %H:%M")));
    digest.push_str(&format!("📊 共 {} 条重要新闻\n\n", news.len()));

    let critical: Vec<&NewsItem> = news
        .iter()
        .filter(|n| n.category == Some(Category::Critical))
        .collect();
    if !critical.is_empty() {
        digest.push_str("## 🔴 极重要新闻\n\n");
        for item in critical {
            digest.push_str(&summarize_single(item));
            digest.push_str("\n\n---\n\n");
        }
    }

    let important: Vec<&NewsItem> = news
        .iter()
        .filter(|n| n.category == Some(Category::Important))
        .collect();
    if !important.is_empty() {
        digest.push_str("## 🟡 重要新闻\n\n");
        for item in important.into_iter().take(MAX_IMPORTANT_IN_DIGEST) {
            digest.push_str(&summarize_single(item));
            digest.push_str("\n\n");
        }
    }

    digest
}

/// Three-line notification for IM/e-mail style delivery.
pub fn generate_notification(item: &NewsItem) -> String {
    let category = item.category.map(Category::label).unwrap_or_default();
    format!(
        "{category} | 评分: {}\n{}\n{}",
        format_score(item.importance_score),
        item.title,
        item.url
    )
}
