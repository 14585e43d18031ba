//! Prediction service payloads
//!
//! Field names follow the service's JSON so responses deserialise directly
//! into these types. Anything that does not fit is rejected at the boundary.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Aggregate result of one batch prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_samples: u64,
    pub normal_count: u64,
    pub attack_count: u64,
    #[serde(default)]
    pub top_attacks: Vec<TopAttack>,
    #[serde(default)]
    pub predictions: Vec<RowPrediction>,
}

impl BatchStats {
    /// Whether `normal_count + attack_count == total_samples`
    ///
    /// The service owns this invariant; callers only observe it.
    pub fn counts_consistent(&self) -> bool {
        self.normal_count.checked_add(self.attack_count) == Some(self.total_samples)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAttack {
    pub attack: String,
    pub count: u64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub percentage: f64,
}

/// Classification of one input row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPrediction {
    pub prediction: String,
    pub confidence: f64,
}

/// Response of the single-sample endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinglePrediction {
    pub prediction: String,
    pub confidence: f64,
}

/// `{"error": "..."}` body returned alongside non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid percentage: {:?}", s))),
    }
}
