use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::CertificateStore;
use crate::{
    error::StoreError,
    record::{CertificateRecord, PendingCertificate},
};

/// In-memory certificate store
#[derive(Default)]
pub struct MemoryCertificateStore {
    records: RwLock<HashMap<String, CertificateRecord>>,
}

impl MemoryCertificateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CertificateStore for MemoryCertificateStore {
    async fn insert(&self, pending: PendingCertificate) -> Result<CertificateRecord, StoreError> {
        let mut records = self.records.write().await;

        let key = pending.certificate_id.to_string();
        if records.contains_key(&key) {
            return Err(StoreError::Conflict(key));
        }

        let record = CertificateRecord::from_pending(pending, Utc::now().timestamp());
        records.insert(key, record.clone());
        Ok(record)
    }

    async fn get_by_id(
        &self,
        certificate_id: &str,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self.records.read().await.get(certificate_id).cloned())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
