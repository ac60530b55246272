//! Certificate records
//!
//! A record moves through three shapes: the submitted [`NewCertificate`]
//! form, the [`PendingCertificate`] handed to the store once an identifier and
//! verification URL are assigned, and the stored [`CertificateRecord`] that
//! carries the store-assigned `created_at`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::id::CertificateId;

const DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATE_LEN: usize = 10;
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Presentation variant of a certificate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Classic,
    Professional,
    Modern,
}

impl TemplateType {
    pub const ALL: [TemplateType; 3] = [Self::Classic, Self::Professional, Self::Modern];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Professional => "professional",
            Self::Modern => "modern",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submitted certificate form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "dates_in_order", skip_on_field_errors = true))]
pub struct NewCertificate {
    #[validate(length(min = 1, message = "student name is required"))]
    pub student_name: String,

    #[validate(length(min = 1, message = "institution name is required"))]
    pub institution_name: String,

    #[validate(length(min = 1, message = "certificate type is required"))]
    pub certificate_type: String,

    #[validate(length(min = 1, message = "domain is required"))]
    pub domain: String,

    #[validate(custom(function = "iso_date"))]
    pub start_date: Option<String>,

    #[validate(custom(function = "iso_date"))]
    pub end_date: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub template_type: TemplateType,
}

impl NewCertificate {
    /// Trim every field; blank optional fields become `None`.
    pub fn normalized(self) -> Self {
        Self {
            student_name: self.student_name.trim().to_string(),
            institution_name: self.institution_name.trim().to_string(),
            certificate_type: self.certificate_type.trim().to_string(),
            domain: self.domain.trim().to_string(),
            start_date: non_blank(self.start_date),
            end_date: non_blank(self.end_date),
            description: non_blank(self.description),
            template_type: self.template_type,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `YYYY-MM-DD` with zero-padded parts; chrono alone also accepts `2025-6-1`
fn iso_date(value: &str) -> Result<(), ValidationError> {
    let padded = value.len() == ISO_DATE_LEN;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(_) if padded => Ok(()),
        _ => Err(
            ValidationError::new("iso_date").with_message("expected a YYYY-MM-DD date".into()),
        ),
    }
}

fn dates_in_order(form: &NewCertificate) -> Result<(), ValidationError> {
    let (Some(start), Some(end)) = (&form.start_date, &form.end_date) else {
        return Ok(());
    };
    match (
        NaiveDate::parse_from_str(start, DATE_FORMAT),
        NaiveDate::parse_from_str(end, DATE_FORMAT),
    ) {
        (Ok(start), Ok(end)) if end < start => Err(ValidationError::new("date_order")
            .with_message("end date is before start date".into())),
        _ => Ok(()),
    }
}

/// A validated form with its identifier assigned, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCertificate {
    pub certificate_id: CertificateId,
    pub student_name: String,
    pub institution_name: String,
    pub certificate_type: String,
    pub domain: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub verification_url: String,
    /// Payload encoded by the QR code printed on the certificate
    pub qr_code_data: String,
    pub template_type: TemplateType,
}

impl PendingCertificate {
    /// `form` is expected to be normalized and validated already.
    pub fn new(certificate_id: CertificateId, form: NewCertificate, origin: &str) -> Self {
        let url = verification_url(origin, &certificate_id);
        Self {
            certificate_id,
            student_name: form.student_name,
            institution_name: form.institution_name,
            certificate_type: form.certificate_type,
            domain: form.domain,
            start_date: form.start_date,
            end_date: form.end_date,
            description: form.description,
            qr_code_data: url.clone(),
            verification_url: url,
            template_type: form.template_type,
        }
    }
}

/// Stored certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub certificate_id: CertificateId,
    pub student_name: String,
    pub institution_name: String,
    pub certificate_type: String,
    pub domain: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub verification_url: String,
    pub qr_code_data: String,
    #[serde(default)]
    pub template_type: TemplateType,
    /// Unix timestamp assigned by the store
    pub created_at: i64,
}

impl CertificateRecord {
    pub fn from_pending(pending: PendingCertificate, created_at: i64) -> Self {
        Self {
            certificate_id: pending.certificate_id,
            student_name: pending.student_name,
            institution_name: pending.institution_name,
            certificate_type: pending.certificate_type,
            domain: pending.domain,
            start_date: pending.start_date,
            end_date: pending.end_date,
            description: pending.description,
            verification_url: pending.verification_url,
            qr_code_data: pending.qr_code_data,
            template_type: pending.template_type,
            created_at,
        }
    }

    /// Issue date, e.g. `March 4, 2025`
    pub fn issued_on(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.created_at, 0)
            .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// `from <start> to <end>` when both dates are present
    pub fn duration(&self) -> Option<String> {
        let start = display_date(self.start_date.as_deref()?)?;
        let end = display_date(self.end_date.as_deref()?)?;
        Some(format!("from {start} to {end}"))
    }
}

fn display_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
}

/// `<origin>/verify/<certificate_id>`
pub fn verification_url(origin: &str, certificate_id: &CertificateId) -> String {
    format!("{}/verify/{}", origin.trim_end_matches('/'), certificate_id)
}
