//! Post endpoints.

use reqwest::Method;

use super::{ApiClient, Reply};
use crate::errors::ApiError;
use crate::models::{DraftPost, PostListPayload, PostSummary};

/// GET user/posts - Posts authored by the signed-in user.
pub(super) async fn list_own(client: &ApiClient) -> Result<Vec<PostSummary>, ApiError> {
    let reply = client.get::<PostListPayload>("user/posts").await?;
    Ok(reply.data.map(|p| p.posts).unwrap_or_default())
}

/// GET posts - Every post.
pub(super) async fn list_all(client: &ApiClient) -> Result<Vec<PostSummary>, ApiError> {
    let reply = client.get::<PostListPayload>("posts").await?;
    Ok(reply.data.map(|p| p.posts).unwrap_or_default())
}

/// POST posts - Create a post.
pub(super) async fn create(client: &ApiClient, draft: &DraftPost) -> Result<Reply<()>, ApiError> {
    client.ack_json(Method::POST, "posts", draft).await
}

/// PUT posts/:id - Replace an existing post.
pub(super) async fn update(
    client: &ApiClient,
    id: &str,
    draft: &DraftPost,
) -> Result<Reply<()>, ApiError> {
    client
        .ack_json(Method::PUT, &format!("posts/{}", id), draft)
        .await
}
