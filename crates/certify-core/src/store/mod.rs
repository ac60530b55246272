//! Certificate storage seam
//!
//! Records are immutable once stored, so backends expose insertion and lookup
//! only. Backends must reject a duplicate `certificate_id` atomically with
//! [`StoreError::Conflict`]; the issuer relies on it to retry with a fresh id.

mod memory;

use async_trait::async_trait;

pub use memory::MemoryCertificateStore;

use crate::{
    error::StoreError,
    record::{CertificateRecord, PendingCertificate},
};

#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Persist a new record. The store assigns `created_at`.
    async fn insert(&self, pending: PendingCertificate) -> Result<CertificateRecord, StoreError>;

    /// Exact-match lookup by certificate id
    async fn get_by_id(&self, certificate_id: &str)
    -> Result<Option<CertificateRecord>, StoreError>;

    /// Short backend name for status reporting
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Wraps the memory store and counts calls
    #[derive(Default)]
    pub(crate) struct CountingStore {
        pub(crate) inner: MemoryCertificateStore,
        pub(crate) inserts: AtomicUsize,
        pub(crate) lookups: AtomicUsize,
    }

    impl CountingStore {
        pub(crate) fn inserts(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }

        pub(crate) fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CertificateStore for CountingStore {
        async fn insert(
            &self,
            pending: PendingCertificate,
        ) -> Result<CertificateRecord, StoreError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(pending).await
        }

        async fn get_by_id(
            &self,
            certificate_id: &str,
        ) -> Result<Option<CertificateRecord>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_by_id(certificate_id).await
        }

        fn backend(&self) -> &'static str {
            "counting"
        }
    }

    /// Every call fails as if the backend were unreachable
    pub(crate) struct UnreachableStore;

    #[async_trait]
    impl CertificateStore for UnreachableStore {
        async fn insert(&self, _: PendingCertificate) -> Result<CertificateRecord, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn get_by_id(&self, _: &str) -> Result<Option<CertificateRecord>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        fn backend(&self) -> &'static str {
            "unreachable"
        }
    }
}
