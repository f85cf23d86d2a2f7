pub mod aggregator;
pub mod engine;
pub mod models;

pub use aggregator::{recompute, ScoreLocks};
pub use engine::{classify, summarize, Classification, ScoreSummary, MAX_TOTAL};
pub use models::ScoreRecord;
