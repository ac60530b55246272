use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::{
    handlers::{
        catalog::get_catalog,
        certificate::{download_certificate_pdf, generate_certificate, get_certificate},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::certificate::generate_certificate,
        crate::handlers::certificate::get_certificate,
        crate::handlers::certificate::download_certificate_pdf,
        crate::handlers::catalog::get_catalog,
    ),
    tags(
        (name = "Certificate", description = "Certificate issuing and export APIs")
    ),
)]
pub struct CertificateApi;

/// Records are immutable: only create and read routes exist.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_certificate))
        .route("/success/{certificate_id}", get(get_certificate))
        .route("/success/{certificate_id}/pdf", get(download_certificate_pdf))
        .route("/catalog", get(get_catalog))
}
