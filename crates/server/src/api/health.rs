//! Liveness and quota usage endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Whether an HF API token is currently present in the environment.
    pub summarizer_configured: bool,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "PDF Summarizer API",
        summarizer_configured: state.config.summarizer.is_configured(),
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UsageResponse {
    /// Calendar month key, `YYYY-MM`.
    pub month: String,
    pub used: u64,
    pub remaining: u64,
    pub limit: u64,
}

/// Current month's character quota
#[utoipa::path(
    get,
    path = "/api/usage",
    tag = "Health",
    responses((status = 200, description = "Characters used and remaining this month", body = UsageResponse))
)]
pub async fn usage(State(state): State<Arc<AppState>>) -> Json<UsageResponse> {
    let snapshot = state.usage.snapshot();
    Json(UsageResponse {
        month: snapshot.month,
        used: snapshot.used,
        remaining: snapshot.remaining,
        limit: snapshot.limit,
    })
}
