// tests/score_stage.rs
// The scorer stage over real snapshot files in a temp workspace.

use chrono::{Duration, TimeZone, Utc};

use ai_news_tracker::score::{self, Scorer};
use ai_news_tracker::{snapshot, Category, NewsItem, RawSnapshot};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap()
}

fn raw_items() -> Vec<NewsItem> {
    vec![
        NewsItem {
            source: "arXiv".into(),
            title: "Groundbreaking open source model, weights released".into(),
            url: "https://arxiv.org/abs/2601.00001".into(),
            published: Some((now() - Duration::minutes(10)).to_rfc3339()),
            arxiv_category: Some("cs.AI".into()),
            ..Default::default()
        },
        NewsItem {
            source: "Hacker News".into(),
            title: "Thoughts on the new AI model launch".into(),
            url: "https://example.org/hn".into(),
            published: Some((now() - Duration::hours(2)).to_rfc3339()),
            score: Some(350),
            comments: Some(80),
            ..Default::default()
        },
        NewsItem {
            source: "Quiet Blog".into(),
            title: "Weekly link roundup".into(),
            url: "https://example.org/roundup".into(),
            published: Some((now() - Duration::hours(30)).to_rfc3339()),
            ..Default::default()
        },
    ]
}

#[test]
fn stage_writes_metadata_and_scored_items() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("data/news_raw.json");
    let output = tmp.path().join("data/news_scored.json");
    snapshot::save_json(&input, &RawSnapshot::new(raw_items(), now())).unwrap();

    let snap = score::run_stage(&input, &output, 10.0, &Scorer::with_defaults(), now()).unwrap();

    assert_eq!(snap.total_raw, 3);
    assert_eq!(snap.total_filtered, snap.news.len());
    assert!(snap.news.windows(2).all(|w| {
        w[0].importance_score >= w[1].importance_score
    }));
    for item in &snap.news {
        assert!(item.importance_score >= 10.0);
        assert!(item.importance_score <= 20.0);
        assert!(item.score_details.is_some());
        let expected = if item.importance_score >= 15.0 {
            Category::Critical
        } else {
            Category::Important
        };
        assert_eq!(item.category, Some(expected));
    }

    // The written file round-trips to the same snapshot.
    let reloaded = snapshot::load_scored(&output).unwrap();
    assert_eq!(reloaded.total_raw, snap.total_raw);
    assert_eq!(reloaded.news, snap.news);

    // The weak roundup item cannot clear the default threshold.
    assert!(snap.news.iter().all(|n| n.url != "https://example.org/roundup"));
}

#[test]
fn raising_the_threshold_is_monotonic_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("news_raw.json");
    snapshot::save_json(&input, &RawSnapshot::new(raw_items(), now())).unwrap();
    let scorer = Scorer::with_defaults();

    let mut previous = usize::MAX;
    for threshold in [0.0, 10.0, 15.0, 20.0] {
        let output = tmp.path().join(format!("scored_{threshold}.json"));
        let snap = score::run_stage(&input, &output, threshold, &scorer, now()).unwrap();
        assert!(snap.total_filtered <= previous);
        previous = snap.total_filtered;
    }
}

#[test]
fn missing_input_terminates_the_stage() {
    let tmp = tempfile::tempdir().unwrap();
    let err = score::run_stage(
        &tmp.path().join("nope.json"),
        &tmp.path().join("out.json"),
        10.0,
        &Scorer::with_defaults(),
        now(),
    );
    assert!(err.is_err());
}
