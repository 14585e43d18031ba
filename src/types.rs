//! IDS Batch Prediction Client - Type System
//!
//! - `upload`: Uploaded CSV files and the metadata kept after upload
//! - `prediction`: Prediction service payloads (single and batch)
//! - `results`: Per-row detailed results derived from batch stats
//! - `history`: Persisted summaries of completed batch runs

pub mod history;
pub mod prediction;
pub mod results;
pub mod upload;

pub use history::HistoryEntry;
pub use prediction::{BatchStats, RowPrediction, SinglePrediction, TopAttack};
pub use results::{derive_detailed_results, DetailedResult};
pub use upload::{SelectedFile, UploadedFile, CSV_MIME_TYPE};

/// Label the classifier uses for benign traffic
pub const NORMAL_LABEL: &str = "Normal";

/// Number of features the model expects per sample
pub const FEATURE_COUNT: usize = 46;
