//! Batch history formatter

use super::utils::{export_json, format_number};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::HistoryEntry;

/// Format the persisted batch history, newest first
pub fn format_history(entries: &[HistoryEntry], format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(&entries),
        OutputFormat::Console => {
            if entries.is_empty() {
                return Ok("No prediction history recorded.\n".to_string());
            }

            let mut output = String::from("\n=== PREDICTION HISTORY ===\n\n");
            output.push_str(&format!(
                "{:<8} {:<9} {:<28} {:>10} {:>10} {:>10} {:>8}\n",
                "Date", "Time", "File", "Total", "Attacks", "Normal", "Rate"
            ));
            for entry in entries {
                output.push_str(&format!(
                    "{:<8} {:<9} {:<28} {:>10} {:>10} {:>10} {:>7.1}%\n",
                    entry.date,
                    entry.time,
                    entry.filename,
                    format_number(entry.total),
                    format_number(entry.attacks),
                    format_number(entry.normal),
                    entry.detection_rate
                ));
            }
            Ok(output)
        }
    }
}
