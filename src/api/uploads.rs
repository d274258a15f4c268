//! File upload endpoint used by the editor's image tool.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{ApiClient, Reply};
use crate::errors::ApiError;

/// File contents plus the name reported to the server.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct UploadPayload {
    url: String,
}

/// POST upload - multipart field `file`.
pub(super) async fn upload(client: &ApiClient, file: UploadFile) -> Result<Reply<String>, ApiError> {
    let part = Part::bytes(file.bytes).file_name(file.file_name);
    let form = Form::new().part("file", part);

    let reply = client
        .post_multipart::<UploadPayload>("upload", form)
        .await?
        .required()?;
    Ok(reply.map(|p| p.url))
}
