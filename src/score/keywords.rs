// src/score/keywords.rs
// Keyword lists and allow-lists driving the rubric, as explicit immutable
// configuration rather than module globals, so tests can substitute them.

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreKeywords {
    /// Innovation tier 5: epoch-making announcements.
    #[serde(default = "seed_breakthrough")]
    pub breakthrough: Vec<String>,
    /// Innovation tier 4: model releases.
    #[serde(default = "seed_model_release")]
    pub model_release: Vec<String>,
    /// Innovation tier 3: research output.
    #[serde(default = "seed_research")]
    pub research: Vec<String>,
    /// Impact tier 5: open weights / open source.
    #[serde(default = "seed_open_source")]
    pub open_source: Vec<String>,
    /// Impact tier 4: order-of-magnitude claims.
    #[serde(default = "seed_magnitude")]
    pub magnitude: Vec<String>,
    /// Impact tier 3: new capabilities.
    #[serde(default = "seed_emergent")]
    pub emergent: Vec<String>,
    /// Impact tier 2: generic improvement wording.
    #[serde(default = "seed_improvement")]
    pub improvement: Vec<String>,
    /// Verifiability tier 5: trusted first-party domains.
    #[serde(default = "seed_trusted_domains")]
    pub trusted_domains: Vec<String>,
    /// Verifiability tier 4: code-hosting domains.
    #[serde(default = "seed_code_hosts")]
    pub code_hosts: Vec<String>,
}

impl Default for ScoreKeywords {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl ScoreKeywords {
    /// Built-in lists.
    pub fn default_seed() -> Self {
        Self {
            breakthrough: seed_breakthrough(),
            model_release: seed_model_release(),
            research: seed_research(),
            open_source: seed_open_source(),
            magnitude: seed_magnitude(),
            emergent: seed_emergent(),
            improvement: seed_improvement(),
            trusted_domains: seed_trusted_domains(),
            code_hosts: seed_code_hosts(),
        }
    }

    /// Load from a JSON file; any missing key keeps its seed value.
    /// Falls back to the full seed on read/parse error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seed_breakthrough() -> Vec<String> {
    strings(&[
        "GPT-5",
        "Claude-4",
        "Gemini 2",
        "DeepSeek",
        "AGI",
        "artificial general intelligence",
        "breakthrough",
        "revolutionary",
        "groundbreaking",
        "state-of-the-art",
        "SOTA",
        "human-level",
        "superhuman",
    ])
}

fn seed_model_release() -> Vec<String> {
    strings(&[
        "new model",
        "model release",
        "launch",
        "parameter",
        "billion",
        "trillion",
        "open source",
        "closed source",
    ])
}

fn seed_research() -> Vec<String> {
    strings(&[
        "paper",
        "research",
        "arxiv",
        "architecture",
        "algorithm",
        "novel",
        "innovative",
    ])
}

fn seed_open_source() -> Vec<String> {
    strings(&["open source", "开源", "weights released"])
}

fn seed_magnitude() -> Vec<String> {
    strings(&["10x", "100x", "order of magnitude"])
}

fn seed_emergent() -> Vec<String> {
    strings(&["emergent", "new capability", "first"])
}

fn seed_improvement() -> Vec<String> {
    strings(&["improve", "better", "faster"])
}

fn seed_trusted_domains() -> Vec<String> {
    strings(&[
        "openai.com",
        "anthropic.com",
        "deepmind.google",
        "arxiv.org",
        "nature.com",
        "science.org",
        "mit.edu",
        "stanford.edu",
    ])
}

fn seed_code_hosts() -> Vec<String> {
    strings(&["github.com", "huggingface.co"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_seed_for_missing_keys() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"breakthrough": ["warp drive"]}}"#).unwrap();
        let kw = ScoreKeywords::load_from_file(f.path());
        assert_eq!(kw.breakthrough, vec!["warp drive"]);
        assert!(kw.trusted_domains.contains(&"arxiv.org".to_string()));
    }

    #[test]
    fn missing_or_broken_file_falls_back_to_seed() {
        let kw = ScoreKeywords::load_from_file("definitely/not/here.json");
        assert!(!kw.model_release.is_empty());

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ broken").unwrap();
        let kw2 = ScoreKeywords::load_from_file(f.path());
        assert_eq!(kw2.research, kw.research);
    }
}
