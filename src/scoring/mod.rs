pub mod blend;
pub mod policy;

pub use blend::{blended_score, rank_by_er, ScoredTopic};
pub use policy::{classify_status, classify_trend, Status, Trend};
