//! Verification
//!
//! A certificate is valid when a record with its identifier currently exists.
//! Lookup failures are reported separately from a missing record so callers
//! can message and retry differently.

use std::sync::Arc;

use crate::{record::CertificateRecord, store::CertificateStore};

/// Outcome of a single verification lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(CertificateRecord),
    NotFound,
    /// The store could not answer; the certificate may or may not exist
    LookupFailed(String),
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn record(&self) -> Option<&CertificateRecord> {
        match self {
            Resolution::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<CertificateRecord> {
        match self {
            Resolution::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Resolution::Found(_) => "valid",
            Resolution::NotFound => "not_found",
            Resolution::LookupFailed(_) => "lookup_failed",
        }
    }
}

#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn CertificateStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn CertificateStore>) -> Self {
        Self { store }
    }

    /// Exactly one store lookup per call, no caching.
    pub async fn resolve(&self, certificate_id: &str) -> Resolution {
        match self.store.get_by_id(certificate_id).await {
            Ok(Some(record)) => Resolution::Found(record),
            Ok(None) => {
                tracing::debug!(certificate_id, "certificate not found");
                Resolution::NotFound
            }
            Err(e) => {
                tracing::error!(certificate_id, error = %e, "certificate lookup failed");
                Resolution::LookupFailed(e.to_string())
            }
        }
    }
}
