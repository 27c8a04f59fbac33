use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::api::{ApiRecommendQuery, ApiRecommendResponse, ApiSegmentRow};
use topic_recommender::{EngineError, RecommenderEngine};

#[derive(Clone)]
struct AppState {
    engine: Arc<RecommenderEngine>,
}

pub async fn serve(engine: RecommenderEngine, args: crate::ServeArgs) -> Result<(), String> {
    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/recommend", get(recommend_handler))
        .route("/api/segments", get(segments_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    tracing::info!(%addr, "serving recommendations");

    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn recommend_handler(
    State(state): State<AppState>,
    Query(query): Query<ApiRecommendQuery>,
) -> Result<Json<ApiRecommendResponse>, (StatusCode, String)> {
    let request = query.into_request().map_err(error_response)?;
    let output = state.engine.recommend(&request).map_err(error_response)?;
    Ok(Json(ApiRecommendResponse::from_output(&request, output)))
}

async fn segments_handler(State(state): State<AppState>) -> Json<Vec<ApiSegmentRow>> {
    Json(
        state
            .engine
            .segments()
            .iter()
            .map(ApiSegmentRow::from_segment)
            .collect(),
    )
}

fn error_response(err: EngineError) -> (StatusCode, String) {
    let status = match err {
        EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
