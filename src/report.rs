// src/report.rs
// Monitor / push / status messages over a scored snapshot. Pure formatting:
// the caller decides where the text goes.

use chrono::{DateTime, Utc};

use crate::collect::config::SourcesConfig;
use crate::model::{format_score, truncate_chars, Category, NewsItem};
use crate::snapshot::ScoredSnapshot;

/// Sentinel for "the pipeline ran, nothing important surfaced".
pub const ALL_CLEAR: &str = "✅ AI 新闻监控正常运行，暂无重要新闻";

/// Display caps: the push message shows at most this many items per
/// category; the status report lists this many top titles.
const PUSH_ITEMS_PER_CATEGORY: usize = 3;
const STATUS_TOP_ITEMS: usize = 3;

fn sorted_desc(news: &[NewsItem]) -> Vec<&NewsItem> {
    let mut sorted: Vec<&NewsItem> = news.iter().collect();
    sorted.sort_by(|a, b| b.importance_score.total_cmp(&a.importance_score));
    sorted
}

fn in_category<'a>(news: &[&'a NewsItem], category: Category) -> Vec<&'a NewsItem> {
    news.iter()
        .filter(|n| n.category == Some(category))
        .copied()
        .collect()
}

/// Full monitor report: every critical item, every important item (with a
/// 100-char summary excerpt). `None` when there is nothing to report.
pub fn news_message(news: &[NewsItem], now: DateTime<Utc>) -> Option<String> {
    if news.is_empty() {
        return None;
    }
    let sorted = sorted_desc(news);
    let critical = in_category(&sorted, Category::Critical);
    let important = in_category(&sorted, Category::Important);

    let mut lines = Vec::new();
    lines.push("🤖 **AI 新闻监控报告**".to_string());
    lines.push(format!("📅 {}", now.format("%Y-%m-%d %H:%M")));
    lines.push(format!("📊 发现 {} 条重要新闻\n", news.len()));

    if !critical.is_empty() {
        lines.push("## 🔴 极重要新闻".to_string());
        for (i, item) in critical.iter().enumerate() {
            lines.push(format!("\n{}. **{}**", i + 1, item.title));
            lines.push(format!("   📍 来源: {}", item.source));
            lines.push(format!(
                "   ⭐ 评分: {}/20",
                format_score(item.importance_score)
            ));
            lines.push(format!("   🔗 {}", item.url));
        }
    }

    if !important.is_empty() {
        lines.push("\n## 🟡 重要新闻".to_string());
        for (i, item) in important.iter().enumerate() {
            lines.push(format!("\n{}. **{}**", i + 1, item.title));
            lines.push(format!("   📍 来源: {}", item.source));
            lines.push(format!(
                "   ⭐ 评分: {}/20",
                format_score(item.importance_score)
            ));
            if let Some(summary) = item.summary.as_deref().filter(|s| !s.is_empty()) {
                lines.push(format!("   📝 {}...", truncate_chars(summary, 100)));
            }
            lines.push(format!("   🔗 {}", item.url));
        }
    }

    Some(lines.join("\n"))
}

/// Compact push message, at most 3 items per category; the all-clear
/// sentinel when nothing qualifies.
pub fn push_message(news: &[NewsItem], now: DateTime<Utc>) -> String {
    let sorted = sorted_desc(news);
    let critical = in_category(&sorted, Category::Critical);
    let important = in_category(&sorted, Category::Important);

    if critical.is_empty() && important.is_empty() {
        return ALL_CLEAR.to_string();
    }

    let mut lines = Vec::new();
    lines.push("🤖 **AI 新闻监控报告**".to_string());
    lines.push(format!("📅 {}", now.format("%Y-%m-%d %H:%M")));
    lines.push(String::new());

    if !critical.is_empty() {
        lines.push(format!("🚨 **发现 {} 条极重要新闻！**\n", critical.len()));
        for (i, item) in critical.iter().take(PUSH_ITEMS_PER_CATEGORY).enumerate() {
            lines.push(format!("**{}. {}**", i + 1, item.title));
            lines.push(format!(
                "📍 {} | ⭐ {}/20",
                item.source,
                format_score(item.importance_score)
            ));
            lines.push(format!("🔗 {}\n", item.url));
        }
    }

    if !important.is_empty() {
        lines.push(format!("📊 **发现 {} 条重要新闻**\n", important.len()));
        for (i, item) in important.iter().take(PUSH_ITEMS_PER_CATEGORY).enumerate() {
            lines.push(format!("**{}. {}**", i + 1, item.title));
            lines.push(format!(
                "📍 {} | ⭐ {}/20",
                item.source,
                format_score(item.importance_score)
            ));
            if let Some(summary) = item.summary.as_deref().filter(|s| !s.is_empty()) {
                lines.push(format!("📝 {}...", truncate_chars(summary, 80)));
            }
            lines.push(format!("🔗 {}\n", item.url));
        }
    }

    lines.join("\n")
}

/// Startup/status report over the latest scored snapshot and the sources
/// config. Both are optional: before the first run completes this renders
/// the waiting branch instead of failing.
pub fn status_report(
    scored: Option<&ScoredSnapshot>,
    config: Option<&SourcesConfig>,
    now: DateTime<Utc>,
) -> String {
    let separator = "=".repeat(50);
    let mut lines = Vec::new();
    lines.push("🤖 **AI 新闻监控系统 - 启动报告**".to_string());
    lines.push(separator.clone());
    lines.push(String::new());
    lines.push(format!("📅 **启动时间**: {}", now.format("%Y-%m-%d %H:%M:%S")));
    lines.push(String::new());

    match scored {
        Some(data) => {
            let sorted = sorted_desc(&data.news);
            let critical = in_category(&sorted, Category::Critical).len();
            let important = in_category(&sorted, Category::Important).len();

            lines.push("📊 **最新监控结果**:".to_string());
            lines.push(format!("  - 采集时间: {}", data.processed_at));
            lines.push(format!("  - 总计: {} 条重要新闻", data.total_filtered));
            lines.push(format!("  - 🔴 极重要: {critical} 条"));
            lines.push(format!("  - 🟡 重要: {important} 条"));
            lines.push(String::new());

            if data.total_filtered > 0 {
                lines.push("**🔝 最新重要新闻**:".to_string());
                for item in sorted.iter().take(STATUS_TOP_ITEMS) {
                    lines.push(format!("  • {}...", truncate_chars(&item.title, 60)));
                    lines.push(format!(
                        "    来源: {} | 评分: {}/20",
                        item.source,
                        format_score(item.importance_score)
                    ));
                }
                lines.push(String::new());
            }
        }
        None => {
            lines.push("⏳ **等待首次监控完成...**".to_string());
            lines.push(String::new());
        }
    }

    if let Some(cfg) = config {
        lines.push("🌐 **数据源配置**:".to_string());
        lines.push(format!("  - arXiv 分类: {} 个", cfg.arxiv_categories.len()));
        lines.push(format!("  - 官方博客: {} 个", cfg.blogs.len()));
        lines.push(format!("  - Twitter 账号: {} 个", cfg.twitter_accounts.len()));
        lines.push(String::new());
    }

    lines.push("📈 **监控状态**: ✅ 运行中".to_string());
    lines.push("🔔 **通知状态**: ✅ 已启用".to_string());
    lines.push(String::new());
    lines.push(separator);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap()
    }

    fn item(title: &str, score: f64, category: Category) -> NewsItem {
        NewsItem {
            source: "arXiv".into(),
            title: title.into(),
            url: format!("https://example.org/{score}"),
            importance_score: score,
            category: Some(category),
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_yields_no_message() {
        assert!(news_message(&[], now()).is_none());
    }

    #[test]
    fn message_sections_follow_categories() {
        let news = vec![
            item("important one", 12.0, Category::Important),
            item("critical one", 18.0, Category::Critical),
        ];
        let msg = news_message(&news, now()).unwrap();
        assert!(msg.contains("## 🔴 极重要新闻"));
        assert!(msg.contains("## 🟡 重要新闻"));
        assert!(msg.contains("📊 发现 2 条重要新闻"));
        // Critical section comes first.
        assert!(msg.find("critical one").unwrap() < msg.find("important one").unwrap());
        assert!(msg.contains("⭐ 评分: 18.0/20"));
    }

    #[test]
    fn push_message_caps_items_and_keeps_counts() {
        let news: Vec<NewsItem> = (0..5)
            .map(|i| item(&format!("critical {i}"), 16.0 + i as f64 * 0.1, Category::Critical))
            .collect();
        let msg = push_message(&news, now());
        assert!(msg.contains("🚨 **发现 5 条极重要新闻！**"));
        assert!(msg.contains("critical 4"));
        assert!(!msg.contains("critical 0")); // beyond the display cap
    }

    #[test]
    fn push_message_all_clear_without_notable_items() {
        assert_eq!(push_message(&[], now()), ALL_CLEAR);
        let only_normal = vec![item("meh", 5.0, Category::Normal)];
        assert_eq!(push_message(&only_normal, now()), ALL_CLEAR);
    }

    #[test]
    fn status_report_waiting_branch() {
        let report = status_report(None, None, now());
        assert!(report.contains("⏳ **等待首次监控完成...**"));
    }

    #[test]
    fn status_report_with_snapshot_and_config() {
        let snap = ScoredSnapshot {
            processed_at: "2026-08-26T11:50:00Z".into(),
            threshold: 10.0,
            total_raw: 7,
            total_filtered: 1,
            news: vec![item("critical one", 18.0, Category::Critical)],
        };
        let cfg = SourcesConfig::default();
        let report = status_report(Some(&snap), Some(&cfg), now());
        assert!(report.contains("总计: 1 条重要新闻"));
        assert!(report.contains("🔴 极重要: 1 条"));
        assert!(report.contains("arXiv 分类: 5 个"));
        assert!(!report.contains("等待首次监控完成"));
    }
}
