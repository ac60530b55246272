pub mod certificate;

use serde::Deserialize;
use surrealdb::{
    Surreal,
    engine::remote::ws::{Client, Ws},
    opt::auth::Root,
};

pub use certificate::SurrealCertificateStore;

use crate::error::Result;

/// Struct representing the Surrealdb configuration parameters.
#[derive(Debug, Deserialize)]
pub struct SurrealdbCfg {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
}

/// Open a connection; the handle is owned by the caller and injected where needed.
pub async fn connect(cfg: &SurrealdbCfg) -> Result<Surreal<Client>> {
    let addr = format!("{}:{}", cfg.host, cfg.port);
    let db = Surreal::new::<Ws>(addr).await?;
    db.signin(Root {
        username: &cfg.username,
        password: &cfg.password,
    })
    .await?;
    db.use_ns(&cfg.namespace).use_db(&cfg.database).await?;
    Ok(db)
}
