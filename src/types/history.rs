use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::BatchStats;
use crate::utils::math::{round_to, safe_percentage};

/// Persisted summary of one completed batch run
///
/// Serialised with camelCase keys so stored lists stay readable by other
/// clients of the same history key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    pub time: String,
    pub total: u64,
    pub attacks: u64,
    pub normal: u64,
    pub filename: String,
    pub detection_rate: f64,
}

impl HistoryEntry {
    /// Build an entry from batch stats, the uploaded file name and a local time
    pub fn from_stats<Tz>(stats: &BatchStats, filename: &str, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            date: at.format("%b %-d").to_string(),
            time: at.format("%I:%M %p").to_string(),
            total: stats.total_samples,
            attacks: stats.attack_count,
            normal: stats.normal_count,
            filename: filename.to_string(),
            detection_rate: detection_rate(stats.attack_count, stats.total_samples),
        }
    }
}

/// Attack share as a percentage rounded to one decimal, `0` for empty batches
pub fn detection_rate(attacks: u64, total: u64) -> f64 {
    round_to(safe_percentage(attacks, total), 1)
}
