use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::{
    handlers::health::{health, status},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health,
        crate::handlers::health::status,
    ),
    tags(
        (name = "Health", description = "Health APIs")
    ),
)]
pub struct HealthApi;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
}
