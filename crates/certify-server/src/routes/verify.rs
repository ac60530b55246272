use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::{handlers::verify::verify_certificate, state::AppState};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::verify::verify_certificate),
    tags(
        (name = "Verification", description = "Certificate verification APIs")
    ),
)]
pub struct VerifyApi;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/verify/{certificate_id}", get(verify_certificate))
}
