//! Feature vector parsing for single predictions
//!
//! Input is the comma-separated text users paste in, often copied from a
//! spreadsheet with stray tabs and spaces around values.

use csv::{ReaderBuilder, Trim};

use crate::errors::FeatureError;
use crate::types::FEATURE_COUNT;

/// Parse and validate a comma-separated feature vector
///
/// Rejects empty input, non-numeric tokens and vectors that are not exactly
/// `FEATURE_COUNT` long. Line breaks are treated like commas.
pub fn parse_features(input: &str) -> Result<Vec<f64>, FeatureError> {
    if input.trim().is_empty() {
        return Err(FeatureError::Empty);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.trim().as_bytes());

    let mut features = Vec::with_capacity(FEATURE_COUNT);
    for record in reader.records() {
        let record = record.map_err(|e| FeatureError::NotNumeric {
            token: e.to_string(),
        })?;
        for field in record.iter() {
            let value = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| FeatureError::NotNumeric {
                    token: field.to_string(),
                })?;
            features.push(value);
        }
    }

    if features.len() != FEATURE_COUNT {
        return Err(FeatureError::WrongCount {
            expected: FEATURE_COUNT,
            actual: features.len(),
        });
    }

    Ok(features)
}
