// src/api.rs
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::error::ScoutError;
use crate::orchestrator::Orchestrator;
use crate::scout::ProductScout;
use crate::types::{AnswerRecord, ArticleRecord, DiscoveryResult, ProductRecord};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub scout: Arc<ProductScout>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/discover", get(discover))
        .route("/api/articles", get(articles))
        .route("/api/product", get(product))
        .route("/api/ask", post(ask))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct FailureBody {
    error: &'static str,
}

/// Map an unrecovered pipeline error to a generic failure body. Internal
/// error text stays in the logs, never in the response.
fn failure_response(err: ScoutError) -> (StatusCode, Json<FailureBody>) {
    warn!(error = %err, "pipeline request failed");
    match err {
        ScoutError::Configuration(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FailureBody {
                error: "service is not configured",
            }),
        ),
        _ => (
            StatusCode::BAD_GATEWAY,
            Json(FailureBody {
                error: "discovery is temporarily unavailable",
            }),
        ),
    }
}

async fn discover(
    State(state): State<AppState>,
) -> Result<Json<DiscoveryResult>, (StatusCode, Json<FailureBody>)> {
    state
        .orchestrator
        .discover()
        .await
        .map(Json)
        .map_err(failure_response)
}

async fn articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleRecord>>, (StatusCode, Json<FailureBody>)> {
    state
        .orchestrator
        .full_articles()
        .await
        .map(Json)
        .map_err(failure_response)
}

async fn product(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<ProductRecord>, (StatusCode, Json<FailureBody>)> {
    let keyword = q.get("keyword").map(|s| s.trim()).unwrap_or_default();
    if keyword.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(FailureBody {
                error: "keyword query parameter is required",
            }),
        ));
    }
    // The scout never fails; every layer degrades internally.
    Ok(Json(state.scout.find_product(keyword).await))
}

#[derive(serde::Deserialize)]
struct AskReq {
    question: String,
}

async fn ask(
    State(state): State<AppState>,
    Json(body): Json<AskReq>,
) -> Result<Json<AnswerRecord>, (StatusCode, Json<FailureBody>)> {
    state
        .orchestrator
        .ask(&body.question)
        .await
        .map(Json)
        .map_err(failure_response)
}
