pub mod closed_form;
pub mod forest;
pub mod tree;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ForestConfig;
use crate::error::Result;
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::synthetic::{TrainingSet, CTR_MAX, CTR_MIN, ER_MAX, ER_MIN};

pub use closed_form::ClosedFormPredictor;
pub use forest::RandomForestRegressor;
pub use tree::{RegressionTree, TreeParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Learned,
    ClosedForm,
}

impl BackendKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "learned" | "forest" | "random_forest" => Some(BackendKind::Learned),
            "closed_form" | "closedform" | "linear" | "fallback" => Some(BackendKind::ClosedForm),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendKind::Learned => "learned",
            BackendKind::ClosedForm => "closed_form",
        }
    }
}

/// Whether the learned backend was compiled in.
pub fn learned_backend_available() -> bool {
    cfg!(feature = "learned")
}

/// ER and CTR forests trained on the same synthetic set with distinct seeds.
#[derive(Debug, Clone)]
pub struct LearnedPredictor {
    er: RandomForestRegressor,
    ctr: RandomForestRegressor,
}

impl LearnedPredictor {
    pub fn train(set: &TrainingSet, forest: &ForestConfig, seed: u64) -> Result<Self> {
        let mut er = RandomForestRegressor::new(forest.clone(), seed);
        let mut ctr = RandomForestRegressor::new(forest.clone(), seed.wrapping_add(1));
        er.fit(&set.rows, &set.er_labels)?;
        ctr.fit(&set.rows, &set.ctr_labels)?;

        info!(
            samples = set.len(),
            trees = er.n_trees(),
            max_depth = forest.max_depth,
            "fitted ER/CTR forests"
        );
        Ok(Self { er, ctr })
    }

    pub fn er_model(&self) -> &RandomForestRegressor {
        &self.er
    }

    pub fn ctr_model(&self) -> &RandomForestRegressor {
        &self.ctr
    }
}

/// Prediction strategy, fixed for the lifetime of an engine.
#[derive(Debug, Clone)]
pub enum EngagementPredictor {
    Learned(LearnedPredictor),
    ClosedForm(ClosedFormPredictor),
}

impl EngagementPredictor {
    pub fn kind(&self) -> BackendKind {
        match self {
            EngagementPredictor::Learned(_) => BackendKind::Learned,
            EngagementPredictor::ClosedForm(_) => BackendKind::ClosedForm,
        }
    }

    pub fn predict_er(&self, features: &FeatureVector) -> Result<f64> {
        match self {
            EngagementPredictor::Learned(models) => {
                Ok(models.er.predict(features)?.clamp(ER_MIN, ER_MAX))
            }
            EngagementPredictor::ClosedForm(model) => Ok(model.predict_er(features)),
        }
    }

    pub fn predict_ctr(&self, features: &FeatureVector) -> Result<f64> {
        match self {
            EngagementPredictor::Learned(models) => {
                Ok(models.ctr.predict(features)?.clamp(CTR_MIN, CTR_MAX))
            }
            EngagementPredictor::ClosedForm(model) => Ok(model.predict_ctr(features)),
        }
    }

    pub fn er_feature_importances(&self) -> Option<[f64; FEATURE_COUNT]> {
        match self {
            EngagementPredictor::Learned(models) => models.er.feature_importances(),
            EngagementPredictor::ClosedForm(_) => None,
        }
    }
}
