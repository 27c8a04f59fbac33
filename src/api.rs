use serde::{Deserialize, Serialize};
use topic_recommender::catalog::AudienceSegment;
use topic_recommender::{
    KpiSummary, RecommendRequest, Recommendations, Result, TopicRecommendation,
};

#[derive(Debug, Deserialize)]
pub struct ApiRecommendQuery {
    pub horizon: Option<String>,
    pub platform: Option<String>,
    pub top_k: Option<i64>,
}

impl ApiRecommendQuery {
    pub fn into_request(self) -> Result<RecommendRequest> {
        let horizon = self.horizon.unwrap_or_else(|| "7".to_string());
        let platform = self.platform.unwrap_or_else(|| "all".to_string());
        RecommendRequest::parse(&horizon, &platform, self.top_k.unwrap_or(6))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiRecommendResponse {
    pub horizon_days: u32,
    pub platform: String,
    pub backend: String,
    pub items: Vec<TopicRecommendation>,
    pub kpi: KpiSummary,
}

impl ApiRecommendResponse {
    pub fn from_output(request: &RecommendRequest, output: Recommendations) -> Self {
        Self {
            horizon_days: request.horizon_days,
            platform: request.platform.clone(),
            backend: output.backend.label().to_string(),
            items: output.items,
            kpi: output.kpi,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSegmentRow {
    pub name: String,
    pub share_percent: f64,
    pub focus: String,
}

impl ApiSegmentRow {
    pub fn from_segment(segment: &AudienceSegment) -> Self {
        Self {
            name: segment.name.clone(),
            share_percent: segment.share_percent(),
            focus: segment.focus.clone(),
        }
    }
}
