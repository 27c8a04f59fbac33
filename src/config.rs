use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::model::BackendKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub seed: u64,
    pub catalog_seed: u64,
    pub segment_seed: u64,
    pub sample_count: usize,
    pub backend: String,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            seed: 42,
            catalog_seed: 7,
            segment_seed: 11,
            sample_count: 600,
            backend: "learned".to_string(),
        }
    }
}

impl EngineSection {
    /// `None` for names that match no backend.
    pub fn backend_kind(&self) -> Option<BackendKind> {
        BackendKind::from_str(&self.backend)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: 6,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub clusters: usize,
    pub n_init: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            clusters: crate::features::CLUSTER_COUNT,
            n_init: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub engine: EngineSection,
    pub forest: ForestConfig,
    pub clustering: ClusteringConfig,
}

impl EngineConfig {
    /// Defaults with a different base seed; handy for tests and embedding.
    pub fn with_seed(seed: u64) -> Self {
        let mut config = Self::default();
        config.engine.seed = seed;
        config
    }

    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(seed) = env::var("RECOMMENDER_SEED") {
            if let Ok(value) = seed.trim().parse::<u64>() {
                self.engine.seed = value;
            }
        }
        if let Ok(backend) = env::var("RECOMMENDER_BACKEND") {
            if !backend.trim().is_empty() {
                self.engine.backend = backend.trim().to_string();
            }
        }
        if let Ok(count) = env::var("RECOMMENDER_SAMPLE_COUNT") {
            if let Ok(value) = count.trim().parse::<usize>() {
                self.engine.sample_count = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RECOMMENDER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/recommender.toml")))
}
