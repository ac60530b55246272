mod db;
mod error;
mod handlers;
mod logging;
mod models;
mod routes;
mod settings;
mod state;

use std::sync::Arc;

use certify_core::{CertificateStore, MemoryCertificateStore};
use settings::{Settings, StoreBackend};
use toolcraft_axum_kit::http_server;

use crate::{
    db::SurrealCertificateStore,
    error::{AppError, Result},
    logging::init_tracing_to_file,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load("config/services.toml")?;
    let _log_guard = init_tracing_to_file(&settings.log);

    let store = open_store(&settings).await?;
    let state = AppState::new(store, &settings.app);

    let router = routes::create_routes(state);
    let http_task = http_server::start(settings.http.port, router);

    tracing::info!("Certify server started on port {}", settings.http.port);
    tracing::info!(
        "Swagger UI available at: http://localhost:{}/swagger-ui",
        settings.http.port
    );
    let _ = tokio::join!(http_task);
    Ok(())
}

async fn open_store(settings: &Settings) -> Result<Arc<dyn CertificateStore>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory certificate store; records are lost on restart");
            Ok(Arc::new(MemoryCertificateStore::new()))
        }
        StoreBackend::Surrealdb => {
            let cfg = settings
                .surrealdb
                .as_ref()
                .ok_or_else(|| AppError::Internal("missing [surrealdb] settings".into()))?;

            tracing::info!("Initializing database connection...");
            let store = SurrealCertificateStore::new(db::connect(cfg).await?);
            store.create_table().await?;
            tracing::info!("Database initialized successfully");
            Ok(Arc::new(store))
        }
    }
}
