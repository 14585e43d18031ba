use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Intrusion detection prediction client
#[derive(Parser)]
#[command(name = "ids-client")]
#[command(about = "Send network traffic samples to the IDS prediction service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single sample of 46 comma-separated features
    Predict(commands::predict::PredictCommand),
    /// Upload a CSV file for batch classification
    Batch(commands::batch::BatchCommand),
    /// Show or clear the batch prediction history
    History(commands::history::HistoryCommand),
    /// Inspect the effective configuration
    Config(commands::config::ConfigCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict(command) => command.run().await,
        Commands::Batch(command) => command.run().await,
        Commands::History(command) => command.run(),
        Commands::Config(command) => command.run(),
    }
}
