//! Authentication endpoints.

use reqwest::Method;

use super::{ApiClient, Reply};
use crate::errors::ApiError;
use crate::models::{AuthPayload, LoginRequest, RegisterRequest};

/// POST auth/login
pub(super) async fn login(
    client: &ApiClient,
    request: &LoginRequest,
) -> Result<Reply<AuthPayload>, ApiError> {
    client
        .send_json::<AuthPayload, _>(Method::POST, "auth/login", request)
        .await?
        .required()
}

/// POST auth/register
pub(super) async fn register(
    client: &ApiClient,
    request: &RegisterRequest,
) -> Result<Reply<AuthPayload>, ApiError> {
    client
        .send_json::<AuthPayload, _>(Method::POST, "auth/register", request)
        .await?
        .required()
}
