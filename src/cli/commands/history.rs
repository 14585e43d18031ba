use crate::analysis::{OutputFormat, ReportFormatter};
use crate::errors::AppResult;
use crate::storage::HistoryStore;
use clap::{Args, Subcommand};

use super::{open_store, ConnectionArgs};

#[derive(Subcommand, Clone)]
pub enum HistoryAction {
    /// List recorded batch runs, newest first (default)
    List,
    /// Delete all recorded batch runs
    Clear,
}

/// Show or clear the batch prediction history
#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub action: Option<HistoryAction>,

    /// Output format (console, json)
    #[arg(long, default_value = "console", global = true)]
    pub format: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl HistoryCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = self.connection.resolve()?;
        let history = HistoryStore::new(open_store(&config)?, &config.history);

        match self.action.clone().unwrap_or(HistoryAction::List) {
            HistoryAction::List => {
                let entries = history.load();
                let output =
                    ReportFormatter::format_history(&entries, &OutputFormat::parse(&self.format))?;
                println!("{}", output);
            }
            HistoryAction::Clear => {
                history.clear()?;
                println!("Prediction history cleared");
            }
        }

        Ok(())
    }
}
