//! Report formatting and output generation
//!
//! Provides formatting for prediction results via the [`ReportFormatter`] facade.
//! Supports Console and JSON output formats.

pub mod batch;
pub mod history;
pub mod single;
pub mod utils;

pub use batch::BatchReport;

use crate::errors::AppResult;
use crate::types::{HistoryEntry, SinglePrediction};

/// Output format options for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

impl OutputFormat {
    /// Parse a format name; anything unrecognised falls back to console
    pub fn parse(format_str: &str) -> Self {
        match format_str.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_batch(report: &BatchReport, format: &OutputFormat) -> AppResult<String> {
        batch::format_batch_report(report, format)
    }

    pub fn format_history(entries: &[HistoryEntry], format: &OutputFormat) -> AppResult<String> {
        history::format_history(entries, format)
    }

    pub fn format_single(result: &SinglePrediction, format: &OutputFormat) -> AppResult<String> {
        single::format_single(result, format)
    }
}
