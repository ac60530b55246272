//! Certificate creation, display and export handlers

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use certify_core::{CertificateRecord, NewCertificate, Resolution, catalog};

use crate::{
    error::{AppError, Result},
    models::certificate::{CertificateResponse, GenerateCertificateRequest, SuccessResponse},
    state::AppState,
};

/// Generate a new certificate
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateCertificateRequest,
    responses(
        (status = 201, description = "Certificate generated", body = CertificateResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 503, description = "Certificate store unavailable"),
    ),
    tag = "Certificate"
)]
pub async fn generate_certificate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateCertificateRequest>,
) -> Result<(StatusCode, Json<CertificateResponse>)> {
    let form = NewCertificate::from(payload);
    if !catalog::is_known_certificate_type(form.certificate_type.trim()) {
        tracing::debug!(certificate_type = %form.certificate_type, "custom certificate type");
    }
    if !catalog::is_known_domain(form.domain.trim()) {
        tracing::debug!(domain = %form.domain, "custom domain");
    }

    let record = state.issuer.issue(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(CertificateResponse {
            success: true,
            data: Some(record.into()),
            message: Some("Certificate generated successfully".to_string()),
        }),
    ))
}

/// Load a record for display or export; missing and unreadable records are errors here
async fn load_certificate(state: &AppState, certificate_id: &str) -> Result<CertificateRecord> {
    match state.resolver.resolve(certificate_id).await {
        Resolution::Found(record) => Ok(record),
        Resolution::NotFound => Err(AppError::NotFound(format!(
            "Certificate with ID {} not found",
            certificate_id
        ))),
        Resolution::LookupFailed(_) => Err(AppError::ServiceUnavailable(
            "Failed to load certificate details.".to_string(),
        )),
    }
}

/// Get a freshly generated certificate with its share and download links
#[utoipa::path(
    get,
    path = "/success/{certificate_id}",
    params(
        ("certificate_id" = String, Path, description = "Certificate ID")
    ),
    responses(
        (status = 200, description = "Certificate found", body = SuccessResponse),
        (status = 404, description = "Certificate not found"),
        (status = 503, description = "Certificate store unavailable"),
    ),
    tag = "Certificate"
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(certificate_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let record = load_certificate(&state, &certificate_id).await?;
    let file_name = certify_core::export::pdf_file_name(record.certificate_id.as_str());
    let download_path = format!("/success/{}/pdf", record.certificate_id);

    Ok(Json(SuccessResponse {
        share_url: record.verification_url.clone(),
        download_path,
        file_name,
        certificate: record.into(),
    }))
}

/// Download the certificate as a PDF
#[utoipa::path(
    get,
    path = "/success/{certificate_id}/pdf",
    params(
        ("certificate_id" = String, Path, description = "Certificate ID")
    ),
    responses(
        (status = 200, description = "PDF document (application/pdf attachment)"),
        (status = 404, description = "Certificate not found"),
        (status = 500, description = "Export failed"),
    ),
    tag = "Certificate"
)]
pub async fn download_certificate_pdf(
    State(state): State<AppState>,
    Path(certificate_id): Path<String>,
) -> Result<Response> {
    let record = load_certificate(&state, &certificate_id).await?;

    let exporter = state.exporter.clone();
    let file = tokio::task::spawn_blocking(move || exporter.export(&record))
        .await
        .map_err(|e| AppError::Internal(format!("export task failed: {e}")))??;

    tracing::info!(file_name = %file.file_name, size = file.bytes.len(), "certificate downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response())
}
