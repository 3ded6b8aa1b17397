// src/collect/sources/mod.rs
pub mod arxiv;
pub mod blogs;
pub mod hackernews;
pub mod twitter;

use super::config::SourcesConfig;
use super::types::NewsSource;

/// Build the source list for one run: one arXiv source per configured
/// category, one source per blog feed, Hacker News, and the declared
/// X/Twitter no-op when accounts are configured.
pub fn from_config(cfg: &SourcesConfig) -> Vec<Box<dyn NewsSource>> {
    let mut out: Vec<Box<dyn NewsSource>> = Vec::new();
    for cat in &cfg.arxiv_categories {
        out.push(Box::new(arxiv::ArxivSource::new(cat.clone())));
    }
    for blog in &cfg.blogs {
        out.push(Box::new(blogs::BlogSource::new(
            blog.name.clone(),
            blog.url.clone(),
        )));
    }
    out.push(Box::new(hackernews::HackerNewsSource::new()));
    if !cfg.twitter_accounts.is_empty() {
        out.push(Box::new(twitter::TwitterSource::new(
            cfg.twitter_accounts.clone(),
        )));
    }
    out
}
