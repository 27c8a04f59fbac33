use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::clamp01;

pub const DEFAULT_CATALOG_SEED: u64 = 7;

const TRAIT_NOISE: f64 = 0.05;

/// A candidate content topic with its base traits, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicItem {
    pub topic: String,
    pub keywords: Vec<String>,
    pub base_popularity: f64,
    pub seasonality: f64,
    pub novelty: f64,
}

impl TopicItem {
    /// Title followed by keywords, the text the clusterer vectorizes.
    pub fn document(&self) -> String {
        let mut parts = Vec::with_capacity(self.keywords.len() + 1);
        parts.push(self.topic.as_str());
        parts.extend(self.keywords.iter().map(String::as_str));
        parts.join(" ")
    }

    pub fn leading_keywords(&self, n: usize) -> Vec<String> {
        self.keywords.iter().take(n).cloned().collect()
    }
}

struct CatalogEntry {
    topic: &'static str,
    keywords: &'static [&'static str],
    base_popularity: f64,
    seasonality: f64,
    novelty: f64,
}

const CATALOG: [CatalogEntry; 12] = [
    CatalogEntry {
        topic: "AI tools for creators",
        keywords: &["AI", "workflow", "automation", "generation", "content"],
        base_popularity: 0.78,
        seasonality: 0.22,
        novelty: 0.62,
    },
    CatalogEntry {
        topic: "Short learning formats",
        keywords: &["how-to", "micro-lessons", "checklist", "guide"],
        base_popularity: 0.70,
        seasonality: 0.18,
        novelty: 0.55,
    },
    CatalogEntry {
        topic: "Digital security trends",
        keywords: &["privacy", "2FA", "secure", "cybersecurity"],
        base_popularity: 0.62,
        seasonality: 0.25,
        novelty: 0.48,
    },
    CatalogEntry {
        topic: "SMM analytics and KPIs",
        keywords: &["CTR", "ER", "A/B", "dashboards", "metrics"],
        base_popularity: 0.60,
        seasonality: 0.14,
        novelty: 0.35,
    },
    CatalogEntry {
        topic: "Creative templates and UI tips",
        keywords: &["design", "template", "minimalism", "UI"],
        base_popularity: 0.58,
        seasonality: 0.16,
        novelty: 0.50,
    },
    CatalogEntry {
        topic: "Niche expert interviews",
        keywords: &["interview", "expert", "case study", "advice"],
        base_popularity: 0.54,
        seasonality: 0.12,
        novelty: 0.40,
    },
    CatalogEntry {
        topic: "AR/VR for education",
        keywords: &["AR", "VR", "edtech", "3D", "simulations"],
        base_popularity: 0.49,
        seasonality: 0.20,
        novelty: 0.60,
    },
    CatalogEntry {
        topic: "Everyday productivity",
        keywords: &["productivity", "time", "habit", "tools"],
        base_popularity: 0.52,
        seasonality: 0.08,
        novelty: 0.30,
    },
    CatalogEntry {
        topic: "Platform trend breakdowns",
        keywords: &["Instagram", "TikTok", "YouTube", "algorithms"],
        base_popularity: 0.65,
        seasonality: 0.24,
        novelty: 0.42,
    },
    CatalogEntry {
        topic: "Storytelling for brands",
        keywords: &["story", "brand", "tone", "format"],
        base_popularity: 0.57,
        seasonality: 0.10,
        novelty: 0.45,
    },
    CatalogEntry {
        topic: "Engineering roundups",
        keywords: &["hardware", "IoT", "edge", "sensors"],
        base_popularity: 0.44,
        seasonality: 0.12,
        novelty: 0.58,
    },
    CatalogEntry {
        topic: "Tool comparisons",
        keywords: &["vs", "comparison", "stack", "pros/cons"],
        base_popularity: 0.59,
        seasonality: 0.10,
        novelty: 0.38,
    },
];

/// Builds the topic catalog with uniform noise of ±0.05 on every trait.
///
/// Traits are drawn in catalog order (popularity, seasonality, novelty per
/// entry), so the same seed always yields the same catalog.
pub fn generate_topics(seed: u64) -> Vec<TopicItem> {
    let mut rng = StdRng::seed_from_u64(seed);

    CATALOG
        .iter()
        .map(|entry| TopicItem {
            topic: entry.topic.to_string(),
            keywords: entry.keywords.iter().map(|kw| kw.to_string()).collect(),
            base_popularity: perturb(entry.base_popularity, &mut rng),
            seasonality: perturb(entry.seasonality, &mut rng),
            novelty: perturb(entry.novelty, &mut rng),
        })
        .collect()
}

fn perturb(value: f64, rng: &mut StdRng) -> f64 {
    clamp01(value + rng.gen_range(-TRAIT_NOISE..=TRAIT_NOISE))
}
