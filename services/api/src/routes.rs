use crate::infra::{AppState, ComplianceSnapshot, ScoringState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use charity_compliance::error::AppError;
use charity_compliance::scoring::ComplianceScores;
use chrono::Utc;
use serde_json::json;
use tracing::info;

pub(crate) fn with_compliance_routes(scoring: ScoringState) -> Router {
    Router::new()
        .route("/api/v1/compliance/score", post(score_endpoint))
        .with_state(scoring)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    State(scoring): State<ScoringState>,
    payload: Result<Json<ComplianceSnapshot>, JsonRejection>,
) -> Result<Json<ComplianceScores>, AppError> {
    let Json(snapshot) = payload?;
    let scores = scoring.score(&snapshot, Utc::now());

    info!(
        overall = scores.overall,
        level = scores.level.key(),
        findings = scores.findings.len(),
        "compliance snapshot scored"
    );

    Ok(Json(scores))
}
