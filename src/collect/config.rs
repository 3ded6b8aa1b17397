// src/collect/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Sources configuration. JSON is the primary format; TOML is accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_arxiv_categories")]
    pub arxiv_categories: Vec<String>,
    #[serde(default)]
    pub blogs: Vec<BlogFeed>,
    /// Declared in the schema; the X/Twitter source is an explicit no-op.
    #[serde(default)]
    pub twitter_accounts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogFeed {
    pub name: String,
    pub url: String,
}

fn default_arxiv_categories() -> Vec<String> {
    ["cs.AI", "cs.CL", "cs.CV", "cs.LG", "cs.NE"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            arxiv_categories: default_arxiv_categories(),
            blogs: Vec::new(),
            twitter_accounts: Vec::new(),
        }
    }
}

impl SourcesConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading sources config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, &ext)
            .with_context(|| format!("parsing sources config {}", path.display()))
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<SourcesConfig> {
    if hint_ext == "toml" {
        if let Ok(cfg) = toml::from_str(s) {
            return Ok(cfg);
        }
    }
    if let Ok(cfg) = serde_json::from_str(s) {
        return Ok(cfg);
    }
    if hint_ext != "toml" {
        if let Ok(cfg) = toml::from_str(s) {
            return Ok(cfg);
        }
    }
    Err(anyhow!("unsupported sources config format"))
}
