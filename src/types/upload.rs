use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::AppResult;

pub const CSV_MIME_TYPE: &str = "text/csv";
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A user-supplied file waiting to be sent to the prediction service
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            byte_size: content.len() as u64,
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let mime_type = guess_mime_type(&name);
        Ok(Self::new(name, mime_type, content))
    }

    /// Override the declared MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// A file is accepted when it declares `text/csv` or is named `*.csv`
    pub fn is_valid_csv(&self) -> bool {
        self.mime_type == CSV_MIME_TYPE || self.name.to_lowercase().ends_with(".csv")
    }

    /// Metadata retained once the content has been handed off
    pub fn metadata(&self) -> SelectedFile {
        SelectedFile {
            name: self.name.clone(),
            byte_size: self.byte_size,
            mime_type: self.mime_type.clone(),
        }
    }
}

/// The currently selected file, without its content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
}

fn guess_mime_type(name: &str) -> &'static str {
    if name.to_lowercase().ends_with(".csv") {
        CSV_MIME_TYPE
    } else {
        FALLBACK_MIME_TYPE
    }
}
