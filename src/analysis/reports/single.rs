//! Single-sample prediction formatter

use serde::Serialize;

use super::utils::export_json;
use super::OutputFormat;
use crate::analysis::severity::{confidence_label, severity_for, Severity};
use crate::errors::AppResult;
use crate::types::SinglePrediction;

#[derive(Debug, Serialize)]
struct SingleReport<'a> {
    prediction: &'a str,
    confidence: f64,
    confidence_percent: String,
    confidence_label: &'static str,
    severity: Severity,
}

/// Format one single-sample classification
pub fn format_single(result: &SinglePrediction, format: &OutputFormat) -> AppResult<String> {
    let report = SingleReport {
        prediction: &result.prediction,
        confidence: result.confidence,
        confidence_percent: format!("{:.2}%", result.confidence * 100.0),
        confidence_label: confidence_label(result.confidence),
        severity: severity_for(&result.prediction),
    };

    match format {
        OutputFormat::Json => export_json(&report),
        OutputFormat::Console => Ok(format!(
            "\n=== PREDICTION ===\n\n\
             Classification: {}\n\
             Severity:       {}\n\
             Confidence:     {} ({})\n",
            report.prediction, report.severity, report.confidence_percent, report.confidence_label
        )),
    }
}
