//! Severity and confidence wording for single predictions

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Safe,
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Safe => "Safe",
            Severity::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checked in order with a case-sensitive substring match, so "DDoS" must
/// precede "DoS".
const SEVERITY_TABLE: &[(&str, Severity)] = &[
    ("DDoS", Severity::Critical),
    ("DoS", Severity::High),
    ("BruteForce", Severity::High),
    ("PortScan", Severity::Medium),
    ("WebAttack", Severity::Medium),
    ("Botnet", Severity::Medium),
    ("Normal", Severity::Safe),
];

pub fn severity_for(label: &str) -> Severity {
    SEVERITY_TABLE
        .iter()
        .find(|(key, _)| label.contains(key))
        .map(|(_, severity)| *severity)
        .unwrap_or(Severity::Unknown)
}

/// Describe a model confidence in [0, 1]
pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.95 {
        "Very High"
    } else if confidence >= 0.85 {
        "High"
    } else if confidence >= 0.70 {
        "Medium"
    } else if confidence >= 0.50 {
        "Low"
    } else {
        "Very Low"
    }
}
