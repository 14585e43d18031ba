//! Presentation-ready views over batch results
//!
//! Pure functions: the same stats and detailed rows always yield the same
//! output, so charts can be regenerated at will.

use serde::Serialize;

use crate::types::{BatchStats, DetailedResult, NORMAL_LABEL};
use crate::utils::math::clamp_percent;

/// Ordered colour table for attack labels; the first case-insensitive
/// substring match wins, so order matters.
pub const ATTACK_PALETTE: &[(&str, &str)] = &[
    ("DDoS", "#EF4444"),
    ("PortScan", "#3B82F6"),
    ("Botnet", "#8B5CF6"),
    ("BruteForce", "#F59E0B"),
    ("Malware", "#10B981"),
    ("Normal", "#6B7280"),
];

pub const DEFAULT_ATTACK_COLOR: &str = "#9CA3AF";

const NORMAL_TRAFFIC_COLOR: &str = "#10B981";
const ATTACK_TRAFFIC_COLOR: &str = "#EF4444";

/// Rows considered by the time series view
pub const TIME_SERIES_WINDOW: usize = 100;
/// Number of chunks the time series window is split into
pub const TIME_SERIES_CHUNKS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackSlice {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficBucket {
    pub name: &'static str,
    pub value: u64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceBand {
    pub label: &'static str,
    /// Inclusive lower edge, in percent
    pub min: f64,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    pub label: String,
    pub attacks: usize,
    pub normal: usize,
    pub total: usize,
}

/// (label, inclusive lower edge, colour), highest band first
const CONFIDENCE_BANDS: [(&str, f64, &str); 5] = [
    ("90-100%", 90.0, "#10B981"),
    ("80-89%", 80.0, "#22C55E"),
    ("70-79%", 70.0, "#F59E0B"),
    ("60-69%", 60.0, "#F97316"),
    ("Below 60%", 0.0, "#EF4444"),
];

pub fn attack_color(attack: &str) -> &'static str {
    let lowered = attack.to_lowercase();
    ATTACK_PALETTE
        .iter()
        .find(|(key, _)| lowered.contains(&key.to_lowercase()))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_ATTACK_COLOR)
}

/// Top attacks in service order, each with its palette colour
pub fn attack_distribution(stats: &BatchStats) -> Vec<AttackSlice> {
    stats
        .top_attacks
        .iter()
        .map(|item| AttackSlice {
            name: item.attack.clone(),
            count: item.count,
            percentage: item.percentage,
            color: attack_color(&item.attack),
        })
        .collect()
}

pub fn traffic_split(stats: &BatchStats) -> [TrafficBucket; 2] {
    [
        TrafficBucket {
            name: NORMAL_LABEL,
            value: stats.normal_count,
            color: NORMAL_TRAFFIC_COLOR,
        },
        TrafficBucket {
            name: "Attack",
            value: stats.attack_count,
            color: ATTACK_TRAFFIC_COLOR,
        },
    ]
}

/// Count rows per confidence band
///
/// Confidences are clamped into [0, 100] first, so every row lands in
/// exactly one band. A value of exactly 90 belongs to the top band.
pub fn confidence_histogram(results: &[DetailedResult]) -> Vec<ConfidenceBand> {
    let mut bands: Vec<ConfidenceBand> = CONFIDENCE_BANDS
        .iter()
        .map(|&(label, min, color)| ConfidenceBand {
            label,
            min,
            count: 0,
            color,
        })
        .collect();

    for result in results {
        let confidence = clamp_percent(result.confidence_percent);
        if let Some(band) = bands.iter_mut().find(|band| confidence >= band.min) {
            band.count += 1;
        }
    }

    bands
}

/// Attack vs normal counts over the first rows, in contiguous chunks
pub fn time_series(results: &[DetailedResult]) -> Vec<TimeBucket> {
    let window = &results[..results.len().min(TIME_SERIES_WINDOW)];
    if window.is_empty() {
        return Vec::new();
    }

    let chunk_size = window.len().div_ceil(TIME_SERIES_CHUNKS);
    window
        .chunks(chunk_size)
        .enumerate()
        .map(|(index, chunk)| {
            let attacks = chunk.iter().filter(|r| r.is_attack()).count();
            TimeBucket {
                label: format!("Batch {}", index + 1),
                attacks,
                normal: chunk.len() - attacks,
                total: chunk.len(),
            }
        })
        .collect()
}
