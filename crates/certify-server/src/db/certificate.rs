use async_trait::async_trait;
use certify_core::{CertificateRecord, CertificateStore, PendingCertificate, StoreError};
use surrealdb::{Surreal, engine::remote::ws::Client};

use crate::error::Result;

const TABLE: &str = "certificates";

/// Certificate records in SurrealDB, keyed by certificate id
pub struct SurrealCertificateStore {
    db: Surreal<Client>,
}

impl SurrealCertificateStore {
    pub fn new(db: Surreal<Client>) -> Self {
        Self { db }
    }

    /// Create the certificates table
    pub async fn create_table(&self) -> Result<()> {
        let query = r#"
            DEFINE TABLE IF NOT EXISTS certificates SCHEMAFULL;

            DEFINE FIELD IF NOT EXISTS certificate_id   ON TABLE certificates TYPE string ASSERT $value != NONE AND $value != "";
            DEFINE FIELD IF NOT EXISTS student_name     ON TABLE certificates TYPE string ASSERT $value != NONE AND $value != "";
            DEFINE FIELD IF NOT EXISTS institution_name ON TABLE certificates TYPE string ASSERT $value != NONE AND $value != "";
            DEFINE FIELD IF NOT EXISTS certificate_type ON TABLE certificates TYPE string ASSERT $value != NONE AND $value != "";
            DEFINE FIELD IF NOT EXISTS domain           ON TABLE certificates TYPE string ASSERT $value != NONE AND $value != "";
            DEFINE FIELD IF NOT EXISTS start_date       ON TABLE certificates TYPE option<string>;
            DEFINE FIELD IF NOT EXISTS end_date         ON TABLE certificates TYPE option<string>;
            DEFINE FIELD IF NOT EXISTS description      ON TABLE certificates TYPE option<string>;
            DEFINE FIELD IF NOT EXISTS verification_url ON TABLE certificates TYPE string;
            DEFINE FIELD IF NOT EXISTS qr_code_data     ON TABLE certificates TYPE string;
            DEFINE FIELD IF NOT EXISTS template_type    ON TABLE certificates TYPE string
                ASSERT $value IN ['classic', 'professional', 'modern'];
            DEFINE FIELD IF NOT EXISTS created_at       ON TABLE certificates TYPE int DEFAULT time::unix() READONLY;

            DEFINE INDEX IF NOT EXISTS certificate_id_idx ON TABLE certificates COLUMNS certificate_id UNIQUE;
        "#;

        self.db.query(query).await?.check()?;
        Ok(())
    }
}

fn backend_error(e: surrealdb::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// SurrealDB 2 reports duplicates only through the error text:
/// - record key: ``Database record `certificates:⟨CERT-2025-0042⟩` already exists``
/// - unique index: ``Database index `certificate_id_idx` already contains 'CERT-2025-0042', with record `..` ``
fn is_duplicate(message: &str) -> bool {
    message.contains("already exists") || message.contains("already contains")
}

fn insert_error(certificate_id: &str, message: String) -> StoreError {
    if is_duplicate(&message) {
        StoreError::Conflict(certificate_id.to_string())
    } else {
        StoreError::Backend(message)
    }
}

#[async_trait]
impl CertificateStore for SurrealCertificateStore {
    async fn insert(&self, pending: PendingCertificate) -> Result<CertificateRecord, StoreError> {
        let certificate_id = pending.certificate_id.to_string();
        let created: Option<CertificateRecord> = self
            .db
            .create((TABLE, certificate_id.clone()))
            .content(pending)
            .await
            .map_err(|e| insert_error(&certificate_id, e.to_string()))?;

        created.ok_or_else(|| StoreError::Backend("insert returned no record".to_string()))
    }

    async fn get_by_id(
        &self,
        certificate_id: &str,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        let records: Vec<CertificateRecord> = self
            .db
            .query("SELECT * FROM certificates WHERE certificate_id = $certificate_id LIMIT 1")
            .bind(("certificate_id", certificate_id.to_string()))
            .await
            .map_err(backend_error)?
            .take(0)
            .map_err(backend_error)?;

        Ok(records.into_iter().next())
    }

    fn backend(&self) -> &'static str {
        "surrealdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_is_a_conflict() {
        let err = insert_error(
            "CERT-2025-0042",
            "Database record `certificates:⟨CERT-2025-0042⟩` already exists".to_string(),
        );
        assert_eq!(err, StoreError::Conflict("CERT-2025-0042".to_string()));
    }

    #[test]
    fn test_unique_index_violation_is_a_conflict() {
        let err = insert_error(
            "CERT-2025-0042",
            "Database index `certificate_id_idx` already contains 'CERT-2025-0042', \
             with record `certificates:⟨CERT-2025-0042⟩`"
                .to_string(),
        );
        assert_eq!(err, StoreError::Conflict("CERT-2025-0042".to_string()));
    }

    #[test]
    fn test_other_failures_are_backend_errors() {
        for message in [
            "There was a problem with the database: connection reset",
            concat!(
                "Found 'gothic' for field `template_type`, but field must conform to: ",
                "$value IN ['classic', 'professional', 'modern']"
            ),
        ] {
            assert_eq!(
                insert_error("CERT-2025-0042", message.to_string()),
                StoreError::Backend(message.to_string())
            );
        }
    }
}
