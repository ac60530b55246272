mod certificate;
mod health;
mod verify;

use axum::Router;
use toolcraft_axum_kit::middleware::cors::create_cors;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    routes::{certificate::CertificateApi, health::HealthApi, verify::VerifyApi},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/health", api = HealthApi),
    ),
)]
struct ApiDoc;

pub fn create_routes(state: AppState) -> Router {
    let cors = create_cors();
    let mut doc = ApiDoc::openapi();
    doc.merge(CertificateApi::openapi());
    doc.merge(VerifyApi::openapi());

    Router::new()
        .nest("/health", health::create_router())
        .merge(certificate::create_router())
        .merge(verify::create_router())
        .with_state(state)
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc))
}
