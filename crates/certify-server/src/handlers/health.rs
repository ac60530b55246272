use axum::{extract::State, response::Json};
use serde_json::json;

use crate::state::AppState;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "Health"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "certify-server"
    }))
}

/// Service status endpoint
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Service status information"),
    ),
    tag = "Health"
)]
pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "store": state.store.backend(),
        "public_origin": state.issuer.origin(),
    }))
}
