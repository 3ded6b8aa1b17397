// src/lib.rs
// Public library surface for the pipeline stages, the CLI binary, and
// integration tests.

pub mod collect;
pub mod digest;
pub mod model;
pub mod report;
pub mod score;
pub mod snapshot;

// ---- Re-exports for stable public API ----
pub use model::{Category, NewsItem, ScoreDetails};
pub use score::Scorer;
pub use snapshot::{RawSnapshot, ScoredSnapshot};
