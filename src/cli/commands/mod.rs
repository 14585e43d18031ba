pub mod batch;
pub mod config;
pub mod history;
pub mod predict;

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::storage::SqliteStore;
use clap::Args;
use std::path::PathBuf;

/// Overrides shared by commands that talk to the service or the store
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    /// Prediction API base URL (overrides config.toml and IDS_API_BASE_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// History database path (overrides storage.database_path)
    #[arg(long)]
    pub database_path: Option<PathBuf>,
}

impl ConnectionArgs {
    /// Load configuration and apply CLI overrides on top
    pub fn resolve(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::load()?;
        if let Some(url) = &self.api_url {
            config.service.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.service.timeout_seconds = timeout;
        }
        if let Some(path) = &self.database_path {
            config.storage.database_path = path.clone();
        }
        Ok(config)
    }
}

pub(crate) fn open_store(config: &AppConfig) -> AppResult<SqliteStore> {
    SqliteStore::new(&config.storage.database_path).map_err(AppError::from)
}
