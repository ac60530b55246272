use std::sync::Arc;

use certify_core::{
    CertificateStore, FrameRasterizer, IdGenerator, Issuer, PdfExporter, Resolver,
};

use crate::settings::AppCfg;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CertificateStore>,
    pub issuer: Issuer,
    pub resolver: Resolver,
    pub exporter: PdfExporter,
}

impl AppState {
    pub fn new(store: Arc<dyn CertificateStore>, cfg: &AppCfg) -> Self {
        Self::with_id_generator(store, cfg, IdGenerator::default())
    }

    pub fn with_id_generator(
        store: Arc<dyn CertificateStore>,
        cfg: &AppCfg,
        ids: IdGenerator,
    ) -> Self {
        Self {
            issuer: Issuer::new(store.clone(), cfg.public_origin.clone())
                .with_id_generator(ids)
                .with_max_attempts(cfg.max_id_attempts),
            resolver: Resolver::new(store.clone()),
            exporter: PdfExporter::new(Arc::new(FrameRasterizer)),
            store,
        }
    }
}
