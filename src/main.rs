//! AI News Tracker — CLI entrypoint.
//! One subcommand per pipeline stage; stages communicate only through the
//! JSON snapshot files on disk, so each invocation stands alone.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_news_tracker::collect::{self, config::SourcesConfig, sources};
use ai_news_tracker::score::{self, keywords::ScoreKeywords, Scorer, DEFAULT_THRESHOLD};
use ai_news_tracker::{digest, report, snapshot, RawSnapshot};

#[derive(Parser, Debug)]
#[command(
    name = "ainews",
    version,
    about = "AI news monitoring pipeline: collect, score, notify, digest"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect fresh items from arXiv, blog feeds and Hacker News
    Collect {
        /// Sources config (JSON or TOML)
        #[arg(long, default_value = "config/sources.json")]
        config: PathBuf,
        /// Raw snapshot output
        #[arg(long, default_value = "data/news_raw.json")]
        output: PathBuf,
    },

    /// Score and filter a raw snapshot
    Score {
        #[arg(long, default_value = "data/news_raw.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/news_scored.json")]
        output: PathBuf,
        /// Keyword lists override (JSON); built-in lists when absent
        #[arg(long, default_value = "config/keywords.json")]
        keywords: PathBuf,
        /// Minimum importance score to keep an item
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// Render the full monitor message from a scored snapshot
    Notify {
        #[arg(long, default_value = "data/news_scored.json")]
        input: PathBuf,
        #[arg(long, default_value = "logs/news_message.txt")]
        output: PathBuf,
    },

    /// Print a compact push message (all-clear when nothing qualifies)
    Push {
        #[arg(long, default_value = "data/news_scored.json")]
        input: PathBuf,
    },

    /// Render a Markdown digest or per-item blocks
    Digest {
        #[arg(long, default_value = "data/news_scored.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/news_digest.md")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "digest")]
        format: DigestFormat,
    },

    /// Print the monitoring status report
    Status {
        #[arg(long, default_value = "data/news_scored.json")]
        input: PathBuf,
        #[arg(long, default_value = "config/sources.json")]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DigestFormat {
    Digest,
    Single,
}

/// Diagnostics go to stderr via tracing; progress lines go to stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ainews=info,ai_news_tracker=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let now = Utc::now();

    match cli.command {
        Command::Collect { config, output } => {
            let cfg = SourcesConfig::load(&config)?;
            let sources = sources::from_config(&cfg);

            println!("[{}] 开始采集 AI 新闻...", now.format("%Y-%m-%d %H:%M:%S"));
            let outcome = collect::run_once(&sources, now).await;
            for r in &outcome.reports {
                match &r.outcome {
                    Ok(n) => println!("→ {}: {} 条", r.source, n),
                    Err(e) => eprintln!("  ✗ {} 采集失败: {}", r.source, e),
                }
            }
            println!("✓ 采集完成，共收集 {} 条新闻\n", outcome.items.len());

            let snap = RawSnapshot::new(outcome.items, now);
            snapshot::save_json(&output, &snap)?;
            println!("✓ 结果已保存到: {}", output.display());
        }

        Command::Score {
            input,
            output,
            keywords,
            threshold,
        } => {
            println!("[{}] 开始评分和过滤...", now.format("%Y-%m-%d %H:%M:%S"));
            let scorer = Scorer::new(ScoreKeywords::load_from_file(&keywords));
            let snap = score::run_stage(&input, &output, threshold, &scorer, now)?;

            let critical = snap
                .news
                .iter()
                .filter(|n| n.category == Some(ai_news_tracker::Category::Critical))
                .count();
            let important = snap
                .news
                .iter()
                .filter(|n| n.category == Some(ai_news_tracker::Category::Important))
                .count();
            println!("✓ 过滤完成：{} → {}", snap.total_raw, snap.total_filtered);
            println!("  🔴 极重要: {critical}");
            println!("  🟡 重要: {important}");
            println!("✓ 结果已保存到: {}\n", output.display());
        }

        Command::Notify { input, output } => {
            let snap = snapshot::load_scored(&input)?;
            match report::news_message(&snap.news, now) {
                None => println!("✓ 无需推送的新闻"),
                Some(message) => {
                    snapshot::save_text(&output, &message)?;
                    println!("✓ 消息已保存到: {}", output.display());
                    println!("\n{message}");
                }
            }
        }

        Command::Push { input } => {
            // A missing or broken snapshot means "nothing to report",
            // never a failed run.
            let message = match snapshot::load_scored(&input) {
                Ok(snap) => report::push_message(&snap.news, now),
                Err(e) => {
                    tracing::warn!(error = ?e, "no usable scored snapshot");
                    report::ALL_CLEAR.to_string()
                }
            };
            println!("{message}");
        }

        Command::Digest {
            input,
            output,
            format,
        } => {
            let snap = snapshot::load_scored(&input)?;
            let content = match format {
                DigestFormat::Digest => {
                    digest::generate_digest(&snap.news, digest::DEFAULT_DIGEST_TITLE, now)
                }
                DigestFormat::Single => snap
                    .news
                    .iter()
                    .map(|item| format!("{}\n\n---\n\n", digest::summarize_single(item)))
                    .collect(),
            };
            snapshot::save_text(&output, &content)?;
            println!("✓ 摘要已保存到: {}", output.display());
        }

        Command::Status { input, config } => {
            let scored = if input.exists() {
                Some(snapshot::load_scored(&input)?)
            } else {
                None
            };
            let cfg = if config.exists() {
                Some(SourcesConfig::load(&config)?)
            } else {
                None
            };
            println!("{}", report::status_report(scored.as_ref(), cfg.as_ref(), now));
        }
    }

    Ok(())
}
