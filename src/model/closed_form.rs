use crate::features::FeatureVector;
use crate::synthetic::{CTR_MAX, CTR_MIN, ER_MAX, ER_MIN};

/// Linear approximation of the engagement formula; needs no training.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormPredictor;

impl ClosedFormPredictor {
    pub fn predict_er(&self, features: &FeatureVector) -> f64 {
        (0.06 + 0.06 * features.popularity + 0.04 * features.novelty + features.trend_delta)
            .clamp(ER_MIN, ER_MAX)
    }

    pub fn predict_ctr(&self, features: &FeatureVector) -> f64 {
        (0.04 + 0.05 * features.popularity + 0.03 * features.seasonality + 0.6 * features.trend_delta)
            .clamp(CTR_MIN, CTR_MAX)
    }
}
