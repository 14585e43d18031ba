use crate::analysis::{OutputFormat, ReportFormatter};
use crate::errors::{AppError, AppResult};
use crate::service::{parse_features, HttpPredictionService, PredictionService};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::ConnectionArgs;

/// Classify a single traffic sample
#[derive(Args)]
pub struct PredictCommand {
    /// Comma-separated feature values
    #[arg(long, conflicts_with = "features_file", required_unless_present = "features_file")]
    pub features: Option<String>,

    /// File containing the comma-separated feature values
    #[arg(long)]
    pub features_file: Option<PathBuf>,

    /// Output format (console, json)
    #[arg(long, default_value = "console")]
    pub format: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl PredictCommand {
    pub async fn run(&self) -> AppResult<()> {
        let raw = match (&self.features, &self.features_file) {
            (Some(features), _) => features.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => {
                return Err(AppError::Config(
                    "Provide --features or --features-file".to_string(),
                ))
            }
        };

        // Reject bad input before touching the network
        let features = parse_features(&raw)?;

        let config = self.connection.resolve()?;
        let service = HttpPredictionService::new(&config.service)?;
        info!("Requesting single prediction from {}", service.base_url());

        let result = service.predict_single(&features).await?;
        let output = ReportFormatter::format_single(&result, &OutputFormat::parse(&self.format))?;
        println!("{}", output);
        Ok(())
    }
}
