//! Prediction service integration module
//!
//! This module provides everything needed to talk to the remote classifier:
//! - **PredictionService** - Trait the batch workflow depends on
//! - **Client** - reqwest-based HTTP implementation of the trait
//! - **Features** - Caller-side validation of single-sample feature vectors

pub mod client;
pub mod features;

pub use client::{HttpPredictionService, BATCH_PREDICT_PATH, SINGLE_PREDICT_PATH};
pub use features::parse_features;

use crate::errors::ServiceResult;
use crate::types::{BatchStats, SinglePrediction, UploadedFile};
use async_trait::async_trait;

/// Remote classifier API
///
/// The batch call is the only suspension point of the batch workflow.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Classify one sample; callers pass exactly `FEATURE_COUNT` values
    async fn predict_single(&self, features: &[f64]) -> ServiceResult<SinglePrediction>;

    /// Classify every row of an uploaded CSV
    async fn predict_batch(&self, file: UploadedFile) -> ServiceResult<BatchStats>;
}
