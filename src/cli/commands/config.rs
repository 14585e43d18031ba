use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::{Args, Subcommand};

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
}

/// Inspect the effective configuration
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

impl ConfigCommand {
    pub fn run(&self) -> AppResult<()> {
        match self.action {
            ConfigAction::Show => {
                let config = AppConfig::load()?;
                let rendered = config
                    .to_toml()
                    .map_err(|e| AppError::Config(format!("Cannot render config: {}", e)))?;
                println!("{}", rendered);
            }
        }
        Ok(())
    }
}
