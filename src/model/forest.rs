use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::ForestConfig;
use crate::error::{EngineError, Result};
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::model::tree::{RegressionTree, TreeParams};

/// Bagged ensemble of regression trees.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    seed: u64,
    trees: Vec<RegressionTree>,
    importances: Option<[f64; FEATURE_COUNT]>,
}

impl RandomForestRegressor {
    pub fn new(config: ForestConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            trees: Vec::new(),
            importances: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn fit(&mut self, rows: &[FeatureVector], labels: &[f64]) -> Result<()> {
        if rows.is_empty() {
            return Err(EngineError::InvalidTrainingSet(
                "cannot fit a forest on zero rows".to_string(),
            ));
        }
        if rows.len() != labels.len() {
            return Err(EngineError::InvalidTrainingSet(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        let matrix: Vec<[f64; FEATURE_COUNT]> = rows.iter().map(FeatureVector::to_array).collect();
        let params = TreeParams {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
        };
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = matrix.len();

        let trees: Vec<RegressionTree> = (0..self.config.n_trees.max(1))
            .map(|_| {
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(&matrix, labels, bootstrap, &params)
            })
            .collect();

        self.importances = Some(mean_importances(&trees));
        self.trees = trees;
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if !self.is_fitted() {
            return Err(EngineError::ModelNotReady("random forest has not been fitted"));
        }
        let row = features.to_array();
        let total: f64 = self.trees.iter().map(|tree| tree.predict(&row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    /// Mean-decrease-impurity importances, summing to 1 when any split exists.
    pub fn feature_importances(&self) -> Option<[f64; FEATURE_COUNT]> {
        self.importances
    }
}

fn mean_importances(trees: &[RegressionTree]) -> [f64; FEATURE_COUNT] {
    let mut mean = [0.0; FEATURE_COUNT];
    for tree in trees {
        let raw = tree.raw_importances();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            continue;
        }
        for (slot, value) in mean.iter_mut().zip(raw) {
            *slot += value / total;
        }
    }

    let total: f64 = mean.iter().sum();
    if total > 0.0 {
        for slot in mean.iter_mut() {
            *slot /= total;
        }
    }
    mean
}
