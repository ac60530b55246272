//! Certificate issuing
//!
//! Validation runs before anything touches the store. The identifier space is
//! small, so a conflicting insert is answered by drawing a new identifier, up
//! to `max_attempts` times.

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{Error, Result, StoreError},
    id::IdGenerator,
    record::{CertificateRecord, NewCertificate, PendingCertificate},
    store::CertificateStore,
};

pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct Issuer {
    store: Arc<dyn CertificateStore>,
    ids: IdGenerator,
    origin: String,
    max_attempts: u32,
}

impl Issuer {
    pub fn new(store: Arc<dyn CertificateStore>, origin: impl Into<String>) -> Self {
        Self {
            store,
            ids: IdGenerator::default(),
            origin: origin.into(),
            max_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Validate the form, assign an identifier and persist the record.
    pub async fn issue(&self, form: NewCertificate) -> Result<CertificateRecord> {
        let form = form.normalized();
        form.validate()?;

        for attempt in 1 ..= self.max_attempts {
            let certificate_id = self.ids.next_id();
            let pending = PendingCertificate::new(certificate_id, form.clone(), &self.origin);

            match self.store.insert(pending).await {
                Ok(record) => {
                    tracing::info!(
                        certificate_id = %record.certificate_id,
                        attempt,
                        "certificate issued"
                    );
                    return Ok(record);
                }
                Err(StoreError::Conflict(id)) => {
                    tracing::warn!(certificate_id = %id, attempt, "certificate id collision");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::IdentifierExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Utc};

    use super::*;
    use crate::{
        id::tests::ScriptedSuffixes,
        record::tests::sample_form,
        resolve::Resolver,
        store::tests::{CountingStore, UnreachableStore},
    };

    const ORIGIN: &str = "https://certs.example.org";

    fn issuer(store: Arc<dyn CertificateStore>, suffixes: &[u16]) -> Issuer {
        Issuer::new(store, ORIGIN)
            .with_id_generator(IdGenerator::new(Arc::new(ScriptedSuffixes::new(suffixes))))
    }

    #[tokio::test]
    async fn test_issue_then_resolve_echoes_fields() {
        let store = Arc::new(CountingStore::default());
        let issuer = issuer(store.clone(), &[42]);

        let record = issuer.issue(sample_form()).await.unwrap();
        let expected_id = format!("CERT-{}-0042", Utc::now().year());
        assert_eq!(record.certificate_id.as_str(), expected_id);
        assert!(record.verification_url.ends_with(&expected_id));
        assert_eq!(
            record.verification_url,
            format!("{ORIGIN}/verify/{expected_id}")
        );
        assert_eq!(store.inserts(), 1);

        let resolved = Resolver::new(store.clone()).resolve(&expected_id).await;
        let found = resolved.record().expect("record should resolve");
        assert_eq!(found.student_name, "Asha Rao");
        assert_eq!(found.institution_name, "ABC College");
        assert_eq!(found.certificate_type, "Internship");
        assert_eq!(found.domain, "Web Development");
        assert_eq!(found, &record);
    }

    #[tokio::test]
    async fn test_missing_field_never_reaches_store() {
        let store = Arc::new(CountingStore::default());
        let issuer = issuer(store.clone(), &[1]);

        let form = NewCertificate {
            domain: String::new(),
            ..sample_form()
        };
        let err = issuer.issue(form).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.inserts(), 0);
    }

    #[tokio::test]
    async fn test_collision_draws_a_new_id() {
        let store = Arc::new(CountingStore::default());
        let issuer = issuer(store.clone(), &[7, 7, 8]);

        let first = issuer.issue(sample_form()).await.unwrap();
        let second = issuer.issue(sample_form()).await.unwrap();

        assert!(first.certificate_id.as_str().ends_with("-0007"));
        assert!(second.certificate_id.as_str().ends_with("-0008"));
        // 1 for the first record, 2 for the collision and the retry
        assert_eq!(store.inserts(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let store = Arc::new(CountingStore::default());
        let issuer = issuer(store.clone(), &[3]).with_max_attempts(4);

        issuer.issue(sample_form()).await.unwrap();
        let err = issuer.issue(sample_form()).await.unwrap_err();

        assert!(matches!(err, Error::IdentifierExhausted { attempts: 4 }));
        assert_eq!(store.inserts(), 5);
        assert_eq!(store.inner.len().await, 1);
    }

    #[tokio::test]
    async fn test_backend_failure_is_not_retried() {
        let issuer = issuer(Arc::new(UnreachableStore), &[1, 2, 3]);
        let err = issuer.issue(sample_form()).await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Backend(_))));
    }
}
