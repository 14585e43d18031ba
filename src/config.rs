use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub history: HistoryConfig,
    pub progress: ProgressConfig,
    pub export: ExportConfig,
}

/// Remote prediction API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./ids_client.db"),
        }
    }
}

/// Persisted batch history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub storage_key: String,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: "predictionHistory".to_string(),
            max_entries: 10,
        }
    }
}

/// Cosmetic upload progress simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub step: u8,
    pub interval_ms: u64,
    pub ceiling: u8,
    pub settle_delay_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step: 5,
            interval_ms: 100,
            ceiling: 95,
            settle_delay_ms: 300,
        }
    }
}

impl ProgressConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output_data/exports"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            storage: StorageConfig::default(),
            history: HistoryConfig::default(),
            progress: ProgressConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default("service.base_url", defaults.service.base_url)?
            .set_default("service.timeout_seconds", defaults.service.timeout_seconds)?
            .set_default(
                "storage.database_path",
                defaults.storage.database_path.to_string_lossy().to_string(),
            )?
            .set_default("history.storage_key", defaults.history.storage_key)?
            .set_default("history.max_entries", defaults.history.max_entries as i64)?
            .set_default("progress.step", defaults.progress.step as i64)?
            .set_default("progress.interval_ms", defaults.progress.interval_ms)?
            .set_default("progress.ceiling", defaults.progress.ceiling as i64)?
            .set_default("progress.settle_delay_ms", defaults.progress.settle_delay_ms)?
            .set_default(
                "export.output_dir",
                defaults.export.output_dir.to_string_lossy().to_string(),
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // IDS_SERVICE__BASE_URL, IDS_PROGRESS__STEP, ...
            .add_source(
                Environment::with_prefix("IDS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(base_url) = env::var("IDS_API_BASE_URL") {
            app_config.service.base_url = base_url;
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// Get config values for CLI argument defaults, falling back to built-in defaults
    pub fn get_defaults() -> Self {
        Self::load().unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_entries == 0 {
            return Err(ConfigError::Message(
                "history.max_entries must be greater than 0".to_string(),
            ));
        }
        if self.progress.ceiling > 100 {
            return Err(ConfigError::Message(
                "progress.ceiling must be at most 100".to_string(),
            ));
        }
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "service.base_url must not be empty. Set IDS_API_BASE_URL or service.base_url in config.toml".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
