use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use certify_core::Resolution;

use crate::{models::certificate::VerificationResponse, state::AppState};

const VALID_MESSAGE: &str = "This certificate is authentic and has been verified in our system.";
const NOT_FOUND_MESSAGE: &str = "The certificate ID you entered could not be found in our system.";
const LOOKUP_FAILED_MESSAGE: &str = "Verification is temporarily unavailable. Please try again.";

/// Verify a certificate by its ID
///
/// A missing certificate is a normal answer (`valid: false`, 200). A store
/// failure is reported as `lookup_failed` with 503 so clients can retry.
#[utoipa::path(
    get,
    path = "/verify/{certificate_id}",
    params(
        ("certificate_id" = String, Path, description = "Certificate ID, e.g. CERT-2025-0042")
    ),
    responses(
        (status = 200, description = "Verification verdict", body = VerificationResponse),
        (status = 503, description = "Lookup failed", body = VerificationResponse),
    ),
    tag = "Verification"
)]
pub async fn verify_certificate(
    State(state): State<AppState>,
    Path(certificate_id): Path<String>,
) -> (StatusCode, Json<VerificationResponse>) {
    let resolution = state.resolver.resolve(&certificate_id).await;
    let valid = resolution.is_valid();
    let status = resolution.status().to_string();

    let (code, message) = match &resolution {
        Resolution::Found(_) => (StatusCode::OK, VALID_MESSAGE),
        Resolution::NotFound => (StatusCode::OK, NOT_FOUND_MESSAGE),
        Resolution::LookupFailed(_) => (StatusCode::SERVICE_UNAVAILABLE, LOOKUP_FAILED_MESSAGE),
    };
    tracing::info!(%certificate_id, status = %status, "certificate verification");

    (
        code,
        Json(VerificationResponse {
            valid,
            status,
            message: message.to_string(),
            certificate: resolution.into_record().map(Into::into),
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use certify_core::{
        CertificateRecord, CertificateStore, NewCertificate, PendingCertificate, StoreError,
    };

    use super::*;
    use crate::{settings::AppCfg, state::tests::memory_state};

    struct DownStore;

    #[async_trait]
    impl CertificateStore for DownStore {
        async fn insert(&self, _: PendingCertificate) -> Result<CertificateRecord, StoreError> {
            Err(StoreError::Backend("down".to_string()))
        }

        async fn get_by_id(&self, _: &str) -> Result<Option<CertificateRecord>, StoreError> {
            Err(StoreError::Backend("down".to_string()))
        }

        fn backend(&self) -> &'static str {
            "down"
        }
    }

    fn form() -> NewCertificate {
        NewCertificate {
            student_name: "Asha Rao".to_string(),
            institution_name: "ABC College".to_string(),
            certificate_type: "Internship".to_string(),
            domain: "Web Development".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_verify_issued_certificate() {
        let state = memory_state(42);
        let record = state.issuer.issue(form()).await.unwrap();
        let id = record.certificate_id.to_string();

        let (code, Json(body)) = verify_certificate(State(state), Path(id.clone())).await;
        assert_eq!(code, StatusCode::OK);
        assert!(body.valid);
        assert_eq!(body.status, "valid");
        let certificate = body.certificate.unwrap();
        assert_eq!(certificate.certificate_id, id);
        assert_eq!(certificate.student_name, "Asha Rao");
    }

    #[tokio::test]
    async fn test_verify_unknown_certificate() {
        let state = memory_state(42);
        let (code, Json(body)) =
            verify_certificate(State(state), Path("CERT-2020-0001".to_string())).await;

        assert_eq!(code, StatusCode::OK);
        assert!(!body.valid);
        assert_eq!(body.status, "not_found");
        assert!(body.certificate.is_none());
    }

    #[tokio::test]
    async fn test_verify_malformed_id_is_not_found() {
        let state = memory_state(42);
        let (code, Json(body)) =
            verify_certificate(State(state), Path("not-a-certificate".to_string())).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "not_found");
    }

    #[tokio::test]
    async fn test_verify_with_store_down() {
        let state = crate::state::AppState::new(Arc::new(DownStore), &AppCfg::default());
        let (code, Json(body)) =
            verify_certificate(State(state), Path("CERT-2025-0042".to_string())).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.valid);
        assert_eq!(body.status, "lookup_failed");
    }
}
