use crate::analysis::{BatchReport, OutputFormat, ReportFormatter};
use crate::errors::{AppError, AppResult};
use crate::service::HttpPredictionService;
use crate::types::UploadedFile;
use crate::workflow::BatchPredictionWorkflow;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

use super::{open_store, ConnectionArgs};

/// Upload a CSV of traffic samples for batch classification
#[derive(Args)]
pub struct BatchCommand {
    /// CSV file to classify
    pub file: PathBuf,

    /// Declared MIME type (defaults to a guess from the file extension)
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Write the summary CSV into this directory after a successful run
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Write the summary CSV into the configured export directory
    #[arg(long, conflicts_with = "export_dir")]
    pub export: bool,

    /// Do not draw the upload progress indicator
    #[arg(long)]
    pub no_progress: bool,

    /// Output format (console, json)
    #[arg(long, default_value = "console")]
    pub format: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl BatchCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = self.connection.resolve()?;
        let service = HttpPredictionService::new(&config.service)?;
        let store = open_store(&config)?;
        let workflow = BatchPredictionWorkflow::new(service, store, &config);

        let mut file = UploadedFile::from_path(&self.file)?;
        if let Some(mime_type) = &self.mime_type {
            file = file.with_mime_type(mime_type.clone());
        }
        info!("Loaded {} ({} bytes)", file.name, file.byte_size);

        let progress_task = (!self.no_progress).then(|| {
            let mut progress = workflow.subscribe_progress();
            tokio::spawn(async move {
                while progress.changed().await.is_ok() {
                    let value = *progress.borrow_and_update();
                    eprint!("\rProcessing... {:>3}%", value);
                    let _ = std::io::stderr().flush();
                }
            })
        });

        let result = workflow.submit(file).await;

        if let Some(task) = progress_task {
            task.abort();
            eprintln!();
        }

        // main reports the returned error
        if let Err(e) = result {
            error!("Batch prediction failed: {}", e);
            return Err(AppError::Workflow(e));
        }

        let snapshot = workflow.snapshot();
        if let Some(stats) = &snapshot.stats {
            let report = BatchReport::new(snapshot.file.clone(), stats, &snapshot.detailed_results);
            let output =
                ReportFormatter::format_batch(&report, &OutputFormat::parse(&self.format))?;
            println!("{}", output);
        }

        let export_dir = if self.export {
            Some(config.export.output_dir.clone())
        } else {
            self.export_dir.clone()
        };
        if let Some(dir) = export_dir {
            if let Some(path) = workflow.write_export(&dir)? {
                println!("Summary written to: {}", path.display());
            }
        }

        Ok(())
    }
}
