//! Downloadable summary of a batch run

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::AppResult;
use crate::types::BatchStats;
use crate::utils::math::safe_percentage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// Write into `dir` (created if needed) and return the file path
    pub fn write_to(&self, dir: &Path) -> AppResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)?;
        info!("Exported batch summary to {}", path.display());
        Ok(path)
    }
}

/// Build the summary CSV for `stats`, naming it after `date`
pub fn build_export(stats: &BatchStats, date: NaiveDate) -> CsvExport {
    let mut content = String::from("Batch Prediction Results\n\n");
    content.push_str(&format!("Total Samples,{}\n", stats.total_samples));
    content.push_str(&format!("Normal Traffic,{}\n", stats.normal_count));
    content.push_str(&format!("Attacks Detected,{}\n", stats.attack_count));
    content.push_str(&format!(
        "Detection Rate,{:.2}%\n",
        safe_percentage(stats.attack_count, stats.total_samples)
    ));
    content.push_str("\nAttack Type,Count,Percentage");

    for attack in &stats.top_attacks {
        content.push_str(&format!(
            "\n{},{},{}%",
            attack.attack, attack.count, attack.percentage
        ));
    }

    CsvExport {
        filename: format!("batch_prediction_results_{}.csv", date.format("%Y-%m-%d")),
        content,
    }
}
