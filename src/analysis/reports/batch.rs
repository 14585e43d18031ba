//! Batch prediction report formatters

use serde::Serialize;

use super::utils::{bar, export_json, format_bytes, format_number};
use super::OutputFormat;
use crate::analysis::views::{
    attack_distribution, confidence_histogram, time_series, traffic_split, AttackSlice,
    ConfidenceBand, TimeBucket, TrafficBucket,
};
use crate::errors::AppResult;
use crate::types::history::detection_rate;
use crate::types::{BatchStats, DetailedResult, SelectedFile};

const BAR_WIDTH: usize = 30;

/// Everything shown after a batch run, in one serialisable value
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub file: Option<SelectedFile>,
    pub total_samples: u64,
    pub normal_count: u64,
    pub attack_count: u64,
    pub detection_rate: f64,
    pub attack_distribution: Vec<AttackSlice>,
    pub traffic_split: [TrafficBucket; 2],
    pub confidence_histogram: Vec<ConfidenceBand>,
    pub time_series: Vec<TimeBucket>,
}

impl BatchReport {
    pub fn new(
        file: Option<SelectedFile>,
        stats: &BatchStats,
        detailed: &[DetailedResult],
    ) -> Self {
        Self {
            file,
            total_samples: stats.total_samples,
            normal_count: stats.normal_count,
            attack_count: stats.attack_count,
            detection_rate: detection_rate(stats.attack_count, stats.total_samples),
            attack_distribution: attack_distribution(stats),
            traffic_split: traffic_split(stats),
            confidence_histogram: confidence_histogram(detailed),
            time_series: time_series(detailed),
        }
    }
}

/// Format a batch report
///
/// Console output covers:
/// - Totals and detection rate
/// - Top attack types
/// - Confidence distribution and per-chunk attack counts
pub fn format_batch_report(report: &BatchReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str("\n=== BATCH PREDICTION RESULTS ===\n\n");
            if let Some(file) = &report.file {
                output.push_str(&format!(
                    "File: {} ({})\n",
                    file.name,
                    format_bytes(file.byte_size)
                ));
            }
            output.push_str(&format!(
                "Total Samples:    {}\n",
                format_number(report.total_samples)
            ));
            for bucket in &report.traffic_split {
                output.push_str(&format!(
                    "{:<17} {:>10}  {}\n",
                    format!("{} Traffic:", bucket.name),
                    format_number(bucket.value),
                    bar(bucket.value, report.total_samples, BAR_WIDTH)
                ));
            }
            output.push_str(&format!(
                "Detection Rate:   {:.1}%\n",
                report.detection_rate
            ));

            if !report.attack_distribution.is_empty() {
                output.push_str("\nTOP ATTACK TYPES:\n");
                for slice in &report.attack_distribution {
                    output.push_str(&format!(
                        "  {:<20} {:>10}  {:>6.1}%  {}\n",
                        slice.name,
                        format_number(slice.count),
                        slice.percentage,
                        slice.color
                    ));
                }
            }

            let rows: usize = report.confidence_histogram.iter().map(|b| b.count).sum();
            if rows > 0 {
                output.push_str("\nCONFIDENCE DISTRIBUTION:\n");
                for band in &report.confidence_histogram {
                    output.push_str(&format!(
                        "  {:<10} {:>8}  {}\n",
                        band.label,
                        format_number(band.count as u64),
                        bar(band.count as u64, rows as u64, BAR_WIDTH)
                    ));
                }
            }

            if !report.time_series.is_empty() {
                output.push_str("\nATTACKS OVER FIRST SAMPLES:\n");
                for bucket in &report.time_series {
                    output.push_str(&format!(
                        "  {:<9} attacks {:>4}  normal {:>4}\n",
                        bucket.label, bucket.attacks, bucket.normal
                    ));
                }
            }

            Ok(output)
        }
    }
}
