use thiserror::Error;

/// Message surfaced when an uploaded file is not a CSV
pub const INVALID_FILE_MESSAGE: &str = "Please upload a valid CSV file (.csv)";

/// Message surfaced when the service failed without telling us why
pub const GENERIC_BATCH_FAILURE: &str = "Batch prediction failed";

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prediction service calls
    #[error("Prediction service error: {0}")]
    Service(#[from] ServiceError),

    /// Persistent key-value storage
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Batch workflow rejections
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Feature vector validation
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FeatureError),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Prediction service error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Connection refused, DNS failure, broken body stream and similar
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout after {timeout_seconds}s: {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },

    /// Non-success status without a structured error body
    #[error("Service returned HTTP {status}")]
    Status { status: u16 },

    /// Non-success status carrying `{"error": "..."}`
    #[error("Service rejected request (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// Success status but the body did not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Base URL or endpoint could not be built
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

impl ServiceError {
    /// Message suitable for showing to the user
    ///
    /// Uses the service-provided message when one exists, otherwise the
    /// generic batch failure text.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Remote { message, .. } => message.clone(),
            _ => GENERIC_BATCH_FAILURE.to_string(),
        }
    }
}

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialisation failed: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Batch workflow error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// File failed the CSV type check; nothing was sent
    #[error("{}", INVALID_FILE_MESSAGE)]
    InvalidFile { name: String, mime_type: String },

    /// Another submission is still outstanding on this workflow
    #[error("A batch prediction is already in progress")]
    AlreadyInProgress,

    /// The remote call failed
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl WorkflowError {
    /// Message the workflow records in its error state for this failure
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Service(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Feature vector validation errors for single predictions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Please enter feature values")]
    Empty,

    #[error("Please enter valid numbers separated by commas")]
    NotNumeric { token: String },

    #[error("Expected exactly {expected} features, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for prediction service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type for key-value storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for batch workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
