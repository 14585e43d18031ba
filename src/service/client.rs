use crate::config::ServiceConfig;
use crate::errors::{ServiceError, ServiceResult};
use crate::service::PredictionService;
use crate::types::prediction::ServiceErrorBody;
use crate::types::{BatchStats, SinglePrediction, UploadedFile, CSV_MIME_TYPE};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

pub const SINGLE_PREDICT_PATH: &str = "api/predict/";
pub const BATCH_PREDICT_PATH: &str = "api/batch-predict/";

#[derive(Serialize)]
struct SinglePredictRequest<'a> {
    features: &'a [f64],
}

/// HTTP client for the remote classifier API
pub struct HttpPredictionService {
    client: Client,
    base_url: Url,
    timeout_seconds: u64,
}

impl HttpPredictionService {
    /// Create a new client for the configured base URL
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        info!("Prediction service client configured for {}", base_url);

        Ok(Self {
            client,
            base_url,
            timeout_seconds: config.timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ServiceResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    fn map_transport_error(&self, operation: &str, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout {
                timeout_seconds: self.timeout_seconds,
                operation: operation.to_string(),
            }
        } else {
            ServiceError::Transport(err.to_string())
        }
    }

    /// Turn a response into `T`, or the most specific error the body allows
    async fn decode<T: DeserializeOwned>(
        &self,
        operation: &str,
        response: Response,
    ) -> ServiceResult<T> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(operation, e))?;

        if !status.is_success() {
            let err = match serde_json::from_slice::<ServiceErrorBody>(&body) {
                Ok(ServiceErrorBody { error }) => ServiceError::Remote {
                    status: status.as_u16(),
                    message: error,
                },
                Err(_) => ServiceError::Status {
                    status: status.as_u16(),
                },
            };
            error!("{} failed: {}", operation, err);
            return Err(err);
        }

        serde_json::from_slice::<T>(&body).map_err(|e| {
            error!("{} returned an unexpected body: {}", operation, e);
            ServiceError::MalformedResponse(e.to_string())
        })
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict_single(&self, features: &[f64]) -> ServiceResult<SinglePrediction> {
        let url = self.endpoint(SINGLE_PREDICT_PATH)?;
        debug!("POST {} with {} features", url, features.len());

        let response = self
            .client
            .post(url)
            .json(&SinglePredictRequest { features })
            .send()
            .await
            .map_err(|e| self.map_transport_error("predict_single", e))?;

        self.decode("predict_single", response).await
    }

    async fn predict_batch(&self, file: UploadedFile) -> ServiceResult<BatchStats> {
        let url = self.endpoint(BATCH_PREDICT_PATH)?;
        debug!(
            "POST {} with {} ({} bytes, {})",
            url, file.name, file.byte_size, file.mime_type
        );

        // Files accepted by name alone may carry no declared type
        let mime_type = if file.mime_type.trim().is_empty() {
            CSV_MIME_TYPE.to_string()
        } else {
            file.mime_type
        };
        let part = Part::bytes(file.content)
            .file_name(file.name)
            .mime_str(&mime_type)
            .map_err(|e| {
                ServiceError::Transport(format!("Invalid MIME type {:?}: {}", mime_type, e))
            })?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error("predict_batch", e))?;

        let stats: BatchStats = self.decode("predict_batch", response).await?;
        info!(
            "Batch prediction complete: {} samples, {} attacks",
            stats.total_samples, stats.attack_count
        );
        Ok(stats)
    }
}

/// Parse the base URL, making sure relative endpoint paths join beneath it
fn parse_base_url(raw: &str) -> ServiceResult<Url> {
    let normalised = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalised).map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", raw, e)))
}
