use axum::response::Json;
use certify_core::{TemplateType, catalog};

use crate::models::certificate::CatalogResponse;

/// Certificate types, domains and templates offered by the form
#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Form choices", body = CatalogResponse),
    ),
    tag = "Certificate"
)]
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        certificate_types: catalog::CERTIFICATE_TYPES.iter().map(|s| s.to_string()).collect(),
        domains: catalog::DOMAINS.iter().map(|s| s.to_string()).collect(),
        templates: TemplateType::ALL.iter().map(|t| t.to_string()).collect(),
        default_template: TemplateType::default().to_string(),
    })
}
