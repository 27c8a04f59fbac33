use std::cmp::Ordering;

use crate::synthetic::{CTR_MAX, ER_MAX};

pub const ER_WEIGHT: f64 = 0.65;
pub const CTR_WEIGHT: f64 = 0.35;

/// Blends ER and CTR after normalizing each by its upper clamp bound.
pub fn blended_score(er_pred: f64, ctr_pred: f64) -> f64 {
    ER_WEIGHT * (er_pred / ER_MAX) + CTR_WEIGHT * (ctr_pred / CTR_MAX)
}

/// A topic's predictions before ranking. `position` is its catalog index.
#[derive(Debug, Clone)]
pub struct ScoredTopic {
    pub position: usize,
    pub er_pred: f64,
    pub ctr_pred: f64,
    pub trend_delta: f64,
    pub score: f64,
}

impl ScoredTopic {
    pub fn new(position: usize, er_pred: f64, ctr_pred: f64, trend_delta: f64) -> Self {
        Self {
            position,
            er_pred,
            ctr_pred,
            trend_delta,
            score: blended_score(er_pred, ctr_pred),
        }
    }
}

/// Orders by predicted ER, highest first. The sort is stable, so equal ER
/// keeps catalog order.
pub fn rank_by_er(topics: &mut [ScoredTopic]) {
    topics.sort_by(|a, b| b.er_pred.partial_cmp(&a.er_pred).unwrap_or(Ordering::Equal));
}
