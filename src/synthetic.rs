use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::catalog::TopicItem;
use crate::error::{EngineError, Result};
use crate::features::{FeatureVector, CLUSTER_COUNT};

pub const DEFAULT_SAMPLE_COUNT: usize = 600;

pub const TRAINING_TREND_MIN: f64 = -0.08;
pub const TRAINING_TREND_MAX: f64 = 0.10;

pub const ER_MIN: f64 = 0.02;
pub const ER_MAX: f64 = 0.16;
pub const CTR_MIN: f64 = 0.01;
pub const CTR_MAX: f64 = 0.14;

const ER_NOISE_SD: f64 = 0.015;
const CTR_NOISE_SD: f64 = 0.012;

#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub rows: Vec<FeatureVector>,
    pub er_labels: Vec<f64>,
    pub ctr_labels: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Latent topic quality the ER label is built from.
pub fn latent_quality(features: &FeatureVector) -> f64 {
    0.45 * features.popularity
        + 0.25 * features.novelty
        + 0.20 * features.seasonality
        + 0.10 * features.cluster_fraction()
}

/// ER label from the generative formula plus `noise`, clamped to [ER_MIN, ER_MAX].
pub fn er_label(features: &FeatureVector, noise: f64) -> f64 {
    let raw = 0.04 + 0.14 * latent_quality(features) + features.trend_delta + noise;
    raw.clamp(ER_MIN, ER_MAX)
}

pub fn ctr_label(features: &FeatureVector, noise: f64) -> f64 {
    let appeal = 0.55 * features.popularity + 0.25 * features.seasonality + 0.20 * features.novelty;
    let raw = 0.02 + 0.10 * appeal + 0.6 * features.trend_delta + noise;
    raw.clamp(CTR_MIN, CTR_MAX)
}

/// Samples `sample_count` labeled rows from the generative ER/CTR formula.
pub fn synthesize_training_set(
    topics: &[TopicItem],
    sample_count: usize,
    seed: u64,
) -> Result<TrainingSet> {
    if topics.is_empty() {
        return Err(EngineError::InvalidTrainingSet(
            "cannot synthesize samples without topics".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let er_noise = Normal::new(0.0, ER_NOISE_SD)
        .map_err(|err| EngineError::Config(format!("invalid ER noise: {}", err)))?;
    let ctr_noise = Normal::new(0.0, CTR_NOISE_SD)
        .map_err(|err| EngineError::Config(format!("invalid CTR noise: {}", err)))?;

    let mut set = TrainingSet {
        rows: Vec::with_capacity(sample_count),
        er_labels: Vec::with_capacity(sample_count),
        ctr_labels: Vec::with_capacity(sample_count),
    };

    for _ in 0..sample_count {
        let Some(topic) = topics.choose(&mut rng) else {
            break;
        };
        let cluster_id = rng.gen_range(0..CLUSTER_COUNT);
        let trend_delta = rng.gen_range(TRAINING_TREND_MIN..=TRAINING_TREND_MAX);

        let features = FeatureVector {
            popularity: topic.base_popularity,
            seasonality: topic.seasonality,
            novelty: topic.novelty,
            trend_delta,
            cluster_id,
        };

        set.er_labels.push(er_label(&features, er_noise.sample(&mut rng)));
        set.ctr_labels.push(ctr_label(&features, ctr_noise.sample(&mut rng)));
        set.rows.push(features);
    }

    debug!(samples = set.len(), seed, "synthesized training set");
    Ok(set)
}
