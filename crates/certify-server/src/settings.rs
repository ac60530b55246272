use serde::Deserialize;
use toolcraft_config::load_settings;

use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http: HttpCfg,
    #[serde(default)]
    pub app: AppCfg,
    #[serde(default)]
    pub log: LogCfg,
    #[serde(default)]
    pub store: StoreCfg,
    pub surrealdb: Option<crate::db::SurrealdbCfg>,
}

#[derive(Debug, Deserialize)]
pub struct HttpCfg {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppCfg {
    /// Origin used to build verification URLs, e.g. `https://certs.example.org`
    pub public_origin: String,

    /// Identifier draws per certificate before giving up on collisions
    pub max_id_attempts: u32,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            public_origin: "http://localhost:8080".to_string(),
            max_id_attempts: certify_core::issue::DEFAULT_MAX_ID_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogCfg {
    pub dir: String,
    pub level: String,
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Surrealdb,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreCfg {
    pub backend: StoreBackend,
}

impl Settings {
    pub fn load(config_path: &str) -> Result<Self> {
        let r = load_settings(config_path)?;
        Ok(r)
    }
}
