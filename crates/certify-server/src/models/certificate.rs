//! Certificate request / response models

use certify_core::{CertificateRecord, NewCertificate, TemplateType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Certificate generation form
///
/// Required fields are optional at the JSON level so that a missing or `null`
/// field is reported by validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerateCertificateRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "Asha Rao")]
    pub student_name: Option<String>,

    #[serde(default)]
    #[schema(value_type = String, example = "ABC College")]
    pub institution_name: Option<String>,

    #[serde(default)]
    #[schema(value_type = String, example = "Internship")]
    pub certificate_type: Option<String>,

    #[serde(default)]
    #[schema(value_type = String, example = "Web Development")]
    pub domain: Option<String>,

    /// ISO date, e.g. `2025-06-01`
    #[serde(default)]
    pub start_date: Option<String>,

    /// ISO date, e.g. `2025-08-31`
    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// `classic` (default), `professional` or `modern`
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "classic")]
    pub template_type: Option<TemplateType>,
}

impl From<GenerateCertificateRequest> for NewCertificate {
    fn from(req: GenerateCertificateRequest) -> Self {
        Self {
            student_name: req.student_name.unwrap_or_default(),
            institution_name: req.institution_name.unwrap_or_default(),
            certificate_type: req.certificate_type.unwrap_or_default(),
            domain: req.domain.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
            template_type: req.template_type.unwrap_or_default(),
        }
    }
}

/// Stored certificate as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CertificateView {
    #[schema(example = "CERT-2025-0042")]
    pub certificate_id: String,
    pub student_name: String,
    pub institution_name: String,
    pub certificate_type: String,
    pub domain: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub verification_url: String,
    pub qr_code_data: String,
    #[schema(value_type = String, example = "classic")]
    pub template_type: TemplateType,
    /// Unix timestamp
    pub created_at: i64,
    /// Issue date, e.g. `March 4, 2025`
    pub issued_on: String,
    /// `from <start> to <end>` when both dates are set
    pub duration: Option<String>,
}

impl From<CertificateRecord> for CertificateView {
    fn from(record: CertificateRecord) -> Self {
        let issued_on = record.issued_on();
        let duration = record.duration();
        Self {
            certificate_id: record.certificate_id.into(),
            student_name: record.student_name,
            institution_name: record.institution_name,
            certificate_type: record.certificate_type,
            domain: record.domain,
            start_date: record.start_date,
            end_date: record.end_date,
            description: record.description,
            verification_url: record.verification_url,
            qr_code_data: record.qr_code_data,
            template_type: record.template_type,
            created_at: record.created_at,
            issued_on,
            duration,
        }
    }
}

/// Response for certificate creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CertificateResponse {
    pub success: bool,
    pub data: Option<CertificateView>,
    pub message: Option<String>,
}

/// Post-creation view: the record plus share and download links
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub certificate: CertificateView,
    /// Link to share; same as the verification URL
    pub share_url: String,
    /// Relative path of the PDF export
    pub download_path: String,
    pub file_name: String,
}

/// Verification verdict
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub valid: bool,
    /// `valid`, `not_found` or `lookup_failed`
    #[schema(example = "valid")]
    pub status: String,
    pub message: String,
    pub certificate: Option<CertificateView>,
}

/// Choices offered by the certificate form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponse {
    pub certificate_types: Vec<String>,
    pub domains: Vec<String>,
    pub templates: Vec<String>,
    pub default_template: String,
}
