use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::catalog::{generate_segments, generate_topics, AudienceSegment, TopicItem};
use crate::cluster::{top_terms, TextClusterer, Vocabulary};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::features::{dominant_feature, FeatureVector, CLUSTER_COUNT};
use crate::model::{
    learned_backend_available, BackendKind, ClosedFormPredictor, EngagementPredictor,
    LearnedPredictor,
};
use crate::scoring::{classify_status, classify_trend, rank_by_er, ScoredTopic};
use crate::synthetic::synthesize_training_set;
use crate::{KpiSummary, Recommendations, TopicRecommendation};

pub const INFERENCE_TREND_MIN: f64 = -0.06;
pub const INFERENCE_TREND_MAX: f64 = 0.08;

const CATALOG_OFFSET_RANGE: u64 = 10_000;
const DRIVER_KEYWORDS: usize = 3;
const EXPLAIN_TERMS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendRequest {
    pub horizon_days: u32,
    /// Context only; recommendations are not filtered or reweighted by platform.
    pub platform: String,
    pub top_k: usize,
}

impl RecommendRequest {
    pub fn new(horizon_days: u32, platform: impl Into<String>, top_k: usize) -> Self {
        Self {
            horizon_days,
            platform: platform.into(),
            top_k,
        }
    }

    /// Builds a request from loosely typed inputs such as "14 days" and a signed `top_k`.
    pub fn parse(horizon: &str, platform: &str, top_k: i64) -> Result<Self> {
        let horizon_days = parse_horizon(horizon)?;
        let top_k = usize::try_from(top_k).map_err(|_| {
            EngineError::InvalidRequest(format!("top_k must be positive, got {}", top_k))
        })?;
        let request = Self::new(horizon_days, platform.trim(), top_k);
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(EngineError::InvalidRequest(
                "top_k must be positive, got 0".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(EngineError::InvalidRequest(
                "horizon must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reads the leading day count of a horizon label ("7", "14 days").
pub fn parse_horizon(text: &str) -> Result<u32> {
    let token = text.split_whitespace().next().unwrap_or("");
    let days = token.parse::<u32>().map_err(|_| {
        EngineError::InvalidRequest(format!("cannot read a day count from horizon {:?}", text))
    })?;
    if days == 0 {
        return Err(EngineError::InvalidRequest(
            "horizon must be at least one day".to_string(),
        ));
    }
    Ok(days)
}

/// Everything a recommendation cycle is computed from.
#[derive(Debug, Clone)]
pub struct CycleInputs {
    pub topics: Vec<TopicItem>,
    pub cluster_ids: Vec<usize>,
    pub trend_deltas: Vec<f64>,
    pub vocabulary: Option<Vocabulary>,
}

impl CycleInputs {
    pub fn features(&self, idx: usize) -> FeatureVector {
        let topic = &self.topics[idx];
        FeatureVector {
            popularity: topic.base_popularity,
            seasonality: topic.seasonality,
            novelty: topic.novelty,
            trend_delta: self.trend_deltas[idx],
            cluster_id: self.cluster_ids[idx],
        }
    }
}

pub struct RecommenderEngine {
    config: EngineConfig,
    predictor: EngagementPredictor,
    clusterer: TextClusterer,
    calls: AtomicU64,
}

impl RecommenderEngine {
    /// Trains both predictors (or selects the closed-form fallback) once.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let requested = check_config(&config)?;
        let backend = resolve_backend(requested);
        let seed = config.engine.seed;

        let (predictor, clusterer) = match backend {
            BackendKind::Learned => {
                let catalog = generate_topics(config.engine.catalog_seed);
                let set = synthesize_training_set(&catalog, config.engine.sample_count, seed)?;
                let models = LearnedPredictor::train(&set, &config.forest, seed)?;
                (
                    EngagementPredictor::Learned(models),
                    TextClusterer::TfIdfKMeans {
                        config: config.clustering.clone(),
                        seed,
                    },
                )
            }
            BackendKind::ClosedForm => (
                EngagementPredictor::ClosedForm(ClosedFormPredictor),
                TextClusterer::Random {
                    clusters: config.clustering.clusters,
                },
            ),
        };

        info!(
            seed,
            backend = backend.label(),
            clusterer = clusterer.label(),
            "recommender engine ready"
        );

        Ok(Self {
            config,
            predictor,
            clusterer,
            calls: AtomicU64::new(0),
        })
    }

    pub fn backend(&self) -> BackendKind {
        self.predictor.kind()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn predictor(&self) -> &EngagementPredictor {
        &self.predictor
    }

    pub fn segments(&self) -> Vec<AudienceSegment> {
        generate_segments(self.config.engine.segment_seed)
    }

    /// Runs one cycle, using the engine's call counter as the nonce.
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Recommendations> {
        request.validate()?;
        let nonce = self.calls.fetch_add(1, Ordering::Relaxed);
        self.recommend_with_nonce(request, nonce)
    }

    /// Runs one cycle with an explicit nonce; same seed and nonce give the same output.
    pub fn recommend_with_nonce(
        &self,
        request: &RecommendRequest,
        nonce: u64,
    ) -> Result<Recommendations> {
        request.validate()?;
        let inputs = self.cycle_inputs(nonce);
        if inputs.topics.is_empty() {
            return Err(EngineError::InvalidRequest(
                "topic catalog is empty".to_string(),
            ));
        }

        let mut scored = Vec::with_capacity(inputs.topics.len());
        for idx in 0..inputs.topics.len() {
            let features = inputs.features(idx);
            let er_pred = self.predictor.predict_er(&features)?;
            let ctr_pred = self.predictor.predict_ctr(&features)?;
            scored.push(ScoredTopic::new(idx, er_pred, ctr_pred, features.trend_delta));
        }

        rank_by_er(&mut scored);
        scored.truncate(request.top_k);

        let importances = self.predictor.er_feature_importances();
        let key_factor = importances.as_ref().map(dominant_feature);

        let items: Vec<TopicRecommendation> = scored
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let topic = &inputs.topics[entry.position];
                TopicRecommendation {
                    rank: idx + 1,
                    topic: topic.topic.clone(),
                    drivers: drivers(topic),
                    er_pred: entry.er_pred,
                    ctr_pred: entry.ctr_pred,
                    trend: classify_trend(entry.trend_delta),
                    explain: explain_topic(topic, inputs.vocabulary.as_ref(), key_factor),
                    status: classify_status(entry.score),
                }
            })
            .collect();

        let kpi = KpiSummary::from_recommendations(&items);
        debug!(
            nonce,
            horizon_days = request.horizon_days,
            platform = %request.platform,
            top_k = request.top_k,
            returned = items.len(),
            avg_er = kpi.avg_er,
            "recommendation cycle complete"
        );

        Ok(Recommendations {
            items,
            kpi,
            backend: self.backend(),
        })
    }

    /// Regenerates the catalog, clusters it and draws trend shocks for `nonce`.
    pub fn cycle_inputs(&self, nonce: u64) -> CycleInputs {
        let mut rng = StdRng::seed_from_u64(call_seed(self.config.engine.seed, nonce));
        let offset = rng.gen_range(0..CATALOG_OFFSET_RANGE);
        let topics = generate_topics(self.config.engine.catalog_seed.wrapping_add(offset));

        let assignment = self.clusterer.fit_and_assign(&topics, &mut rng);
        let trend_deltas = topics
            .iter()
            .map(|_| rng.gen_range(INFERENCE_TREND_MIN..=INFERENCE_TREND_MAX))
            .collect();

        CycleInputs {
            topics,
            cluster_ids: assignment.ids,
            trend_deltas,
            vocabulary: assignment.vocabulary,
        }
    }
}

/// Seed of a single cycle: the first 8 bytes of SHA-256 over `"{base}:{nonce}"`.
pub fn call_seed(base_seed: u64, nonce: u64) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", base_seed, nonce).as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Rejects settings the models cannot honor and returns the requested backend.
fn check_config(config: &EngineConfig) -> Result<BackendKind> {
    let clustering = &config.clustering;
    if clustering.clusters != CLUSTER_COUNT {
        return Err(EngineError::Config(format!(
            "clustering.clusters must be {} (the models are trained on that many clusters), got {}",
            CLUSTER_COUNT, clustering.clusters
        )));
    }
    if clustering.n_init == 0 {
        return Err(EngineError::Config(
            "clustering.n_init must be at least 1".to_string(),
        ));
    }
    if clustering.max_iterations == 0 {
        return Err(EngineError::Config(
            "clustering.max_iterations must be at least 1".to_string(),
        ));
    }
    config.engine.backend_kind().ok_or_else(|| {
        EngineError::Config(format!(
            "unknown backend {:?} (expected \"learned\" or \"closed_form\")",
            config.engine.backend
        ))
    })
}

fn resolve_backend(requested: BackendKind) -> BackendKind {
    match requested {
        BackendKind::Learned if !learned_backend_available() => {
            warn!("learned backend not compiled in; using closed-form predictor and random clusters");
            BackendKind::ClosedForm
        }
        BackendKind::ClosedForm => {
            warn!("closed-form backend selected; clustering falls back to random ids");
            BackendKind::ClosedForm
        }
        other => other,
    }
}

fn drivers(topic: &TopicItem) -> String {
    topic.leading_keywords(DRIVER_KEYWORDS).join(", ")
}

fn explain_topic(
    topic: &TopicItem,
    vocabulary: Option<&Vocabulary>,
    key_factor: Option<&str>,
) -> String {
    let Some(vocabulary) = vocabulary else {
        return format!("High contribution: {}", drivers(topic));
    };

    let terms = top_terms(topic, Some(vocabulary), EXPLAIN_TERMS);
    let mut parts = vec![format!("Terms: {}", terms.join(", "))];
    if let Some(factor) = key_factor {
        parts.push(format!("key factor: {}", factor));
    }
    parts.join(" / ")
}
