//! The content editor's document, treated as an opaque value.

mod upload;

pub use upload::{ImageToolResponse, ImageUploader, UploadedFile};

use std::path::Path;

use serde_json::Value;

use crate::errors::AppError;

/// Editor output. The only thing the workflows need is its transport form.
pub trait Document: Send + Sync {
    fn serialize(&self) -> String;
}

/// Block-editor output held as raw JSON (`{time?, blocks:[...], version?}`).
#[derive(Debug, Clone, PartialEq)]
pub struct EditorDocument {
    value: Value,
}

impl EditorDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn empty() -> Self {
        Self::new(serde_json::json!({ "blocks": [] }))
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::parse(&raw)
    }

    pub fn block_count(&self) -> usize {
        self.value
            .get("blocks")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl Document for EditorDocument {
    fn serialize(&self) -> String {
        self.value.to_string()
    }
}
