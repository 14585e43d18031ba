use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{RowPrediction, NORMAL_LABEL};
use crate::utils::math::round_to;

/// Per-row view of a batch prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResult {
    /// 1-based row number
    pub id: usize,
    pub sample: String,
    pub prediction: String,
    pub confidence_percent: f64,
    pub attack_type: String,
    pub timestamp_iso: String,
}

impl DetailedResult {
    pub fn is_attack(&self) -> bool {
        self.prediction != NORMAL_LABEL
    }
}

/// Derive detailed rows from batch predictions, preserving input order
///
/// Every row is stamped with the same `at` timestamp.
pub fn derive_detailed_results(
    predictions: &[RowPrediction],
    at: DateTime<Utc>,
) -> Vec<DetailedResult> {
    let timestamp_iso = at.to_rfc3339_opts(SecondsFormat::Millis, true);

    predictions
        .iter()
        .enumerate()
        .map(|(index, pred)| {
            let attack_type = if pred.prediction != NORMAL_LABEL {
                pred.prediction.clone()
            } else {
                NORMAL_LABEL.to_string()
            };
            DetailedResult {
                id: index + 1,
                sample: format!("Sample {}", index + 1),
                prediction: pred.prediction.clone(),
                confidence_percent: round_to(pred.confidence * 100.0, 2),
                attack_type,
                timestamp_iso: timestamp_iso.clone(),
            }
        })
        .collect()
}
