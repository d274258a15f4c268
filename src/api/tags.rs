//! Tag endpoints.

use reqwest::Method;

use super::{ApiClient, Reply};
use crate::errors::ApiError;
use crate::models::{CreateTagRequest, Tag, TagListPayload, TagPayload, UpdateTagRequest};

/// GET tags - List all tags.
pub(super) async fn list(client: &ApiClient) -> Result<Vec<Tag>, ApiError> {
    let reply = client.get::<TagListPayload>("tags").await?;
    Ok(reply.data.map(|p| p.tags).unwrap_or_default())
}

/// POST tags - Create a tag by name.
pub(super) async fn create(
    client: &ApiClient,
    request: &CreateTagRequest,
) -> Result<Reply<Tag>, ApiError> {
    let reply = client
        .send_json::<TagPayload, _>(Method::POST, "tags", request)
        .await?
        .required()?;
    Ok(reply.map(|p| p.tag))
}

/// PUT tags/:id - Rename a tag.
pub(super) async fn update(
    client: &ApiClient,
    id: &str,
    request: &UpdateTagRequest,
) -> Result<Reply<Tag>, ApiError> {
    let reply = client
        .send_json::<TagPayload, _>(Method::PUT, &format!("tags/{}", id), request)
        .await?
        .required()?;
    Ok(reply.map(|p| p.tag))
}

/// DELETE tags/:id - Delete a tag.
pub(super) async fn delete(client: &ApiClient, id: &str) -> Result<Reply<()>, ApiError> {
    client.delete(&format!("tags/{}", id)).await
}
