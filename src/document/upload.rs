//! Uploads for the editor's image tool.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::api::{CmsApi, UploadFile};
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub url: String,
}

/// Shape the image tool expects from its uploader: `{success: 1, file: {url}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageToolResponse {
    pub success: u8,
    pub file: UploadedFile,
}

pub struct ImageUploader<A> {
    api: Arc<A>,
}

impl<A: CmsApi> ImageUploader<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn upload_by_file(&self, path: impl AsRef<Path>) -> Result<ImageToolResponse, AppError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        self.upload_bytes(file_name, bytes).await
    }

    pub async fn upload_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<ImageToolResponse, AppError> {
        tracing::debug!(file = %file_name, size = bytes.len(), "Uploading image");
        let reply = self
            .api
            .upload_file(UploadFile { file_name, bytes })
            .await
            .map_err(|e| AppError::Upload(e.user_message()))?;

        Ok(ImageToolResponse {
            success: 1,
            file: UploadedFile { url: reply.data },
        })
    }
}
