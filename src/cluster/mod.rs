//! Text clustering of topics: TF-IDF vectors partitioned with k-means, or
//! uniformly random ids when the learned backend is unavailable.

pub mod kmeans;
pub mod tfidf;

use rand::{rngs::StdRng, Rng};
use std::cmp::Ordering;

use crate::catalog::TopicItem;
use crate::config::ClusteringConfig;

pub use kmeans::{KMeans, KMeansParams};
pub use tfidf::{tokenize, Vocabulary};

const FALLBACK_TERMS: usize = 3;

#[derive(Debug, Clone)]
pub struct ClusterAssignment {
    pub ids: Vec<usize>,
    /// Present only when topics were vectorized.
    pub vocabulary: Option<Vocabulary>,
}

#[derive(Debug, Clone)]
pub enum TextClusterer {
    TfIdfKMeans { config: ClusteringConfig, seed: u64 },
    Random { clusters: usize },
}

impl TextClusterer {
    pub fn label(&self) -> &'static str {
        match self {
            TextClusterer::TfIdfKMeans { .. } => "tfidf-kmeans",
            TextClusterer::Random { .. } => "random",
        }
    }

    /// Assigns every topic a cluster id. The random variant draws from `rng`;
    /// the k-means variant is seeded from its own fixed seed.
    pub fn fit_and_assign(&self, topics: &[TopicItem], rng: &mut StdRng) -> ClusterAssignment {
        match self {
            TextClusterer::TfIdfKMeans { config, seed } => {
                let documents: Vec<String> = topics.iter().map(TopicItem::document).collect();
                let vocabulary = Vocabulary::fit(&documents);
                let vectors = vocabulary.transform_all(&documents);
                let model = KMeans::fit(
                    &vectors,
                    &KMeansParams {
                        k: config.clusters,
                        n_init: config.n_init,
                        max_iterations: config.max_iterations,
                        tolerance: config.tolerance,
                        seed: *seed,
                    },
                );
                ClusterAssignment {
                    ids: model.assignments,
                    vocabulary: Some(vocabulary),
                }
            }
            TextClusterer::Random { clusters } => {
                let clusters = (*clusters).max(1);
                ClusterAssignment {
                    ids: topics.iter().map(|_| rng.gen_range(0..clusters)).collect(),
                    vocabulary: None,
                }
            }
        }
    }
}

/// Top `n` terms of a topic by tf-idf weight, keeping only positive weights.
/// Falls back to the topic's first three keywords when nothing qualifies.
pub fn top_terms(topic: &TopicItem, vocabulary: Option<&Vocabulary>, n: usize) -> Vec<String> {
    let Some(vocabulary) = vocabulary else {
        return topic.leading_keywords(FALLBACK_TERMS);
    };

    let weights = vocabulary.transform(&topic.document());
    let mut ranked: Vec<(usize, f64)> = weights
        .into_iter()
        .enumerate()
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let terms: Vec<String> = ranked
        .into_iter()
        .take(n)
        .filter_map(|(idx, _)| vocabulary.term(idx).map(str::to_string))
        .collect();

    if terms.is_empty() {
        topic.leading_keywords(FALLBACK_TERMS)
    } else {
        terms
    }
}
