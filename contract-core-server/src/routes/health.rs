//! Health check endpoints

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    }))
}

/// Ready check endpoint (verifies storage connectivity with a throwaway lookup)
pub async fn ready_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    // An empty id list short-circuits before reaching the database, so the
    // probe asks for an id that cannot exist.
    let status = if state.store.persons_batch(&[Uuid::nil()]).await.is_ok() {
        "ready"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
    }))
}
