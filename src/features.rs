use serde::{Deserialize, Serialize};

/// Fixed number of text clusters; cluster ids live in `0..CLUSTER_COUNT`.
pub const CLUSTER_COUNT: usize = 4;

pub const FEATURE_COUNT: usize = 5;

/// Display names of the feature slots, in slot order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["popularity", "seasonality", "novelty", "trend", "segment"];

/// Model input. Slot order is part of the model contract: popularity,
/// seasonality, novelty, trend delta, cluster id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub popularity: f64,
    pub seasonality: f64,
    pub novelty: f64,
    pub trend_delta: f64,
    pub cluster_id: usize,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.popularity,
            self.seasonality,
            self.novelty,
            self.trend_delta,
            self.cluster_id as f64,
        ]
    }

    /// Cluster id scaled to [0, 1] over the fixed cluster range.
    pub fn cluster_fraction(&self) -> f64 {
        self.cluster_id as f64 / (CLUSTER_COUNT - 1) as f64
    }
}

/// Name of the slot with the largest weight; first slot wins ties.
pub fn dominant_feature(weights: &[f64; FEATURE_COUNT]) -> &'static str {
    let mut best = 0usize;
    for (idx, weight) in weights.iter().enumerate() {
        if *weight > weights[best] {
            best = idx;
        }
    }
    FEATURE_NAMES[best]
}
