//! Content API module.
//!
//! Every endpoint answers with the same envelope: `{status, message?, response?}`.
//! `status == "success"` means the call was accepted; anything else is a
//! rejection whose `message` is shown to the user verbatim.

mod auth;
mod client;
mod posts;
mod tags;
mod uploads;

pub use client::ApiClient;
pub use uploads::UploadFile;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ApiError;
use crate::models::{
    AuthPayload, CreateTagRequest, DraftPost, LoginRequest, PostSummary, RegisterRequest, Tag,
    UpdateTagRequest,
};

/// Envelope status marking an accepted call.
pub const STATUS_SUCCESS: &str = "success";

/// Response envelope as received, before the payload is typed.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Reject non-success envelopes and decode the payload, if any.
    pub fn into_reply<T: DeserializeOwned>(self) -> Result<Reply<Option<T>>, ApiError> {
        if !self.is_success() {
            let message = self
                .message
                .unwrap_or_else(|| format!("Request failed with status '{}'", self.status));
            return Err(ApiError::Rejected { message });
        }

        let data = match self.response {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?,
            ),
        };

        Ok(Reply {
            data,
            message: self.message,
        })
    }

    /// Accept a success envelope without looking at its payload.
    pub fn into_ack(self) -> Result<Reply<()>, ApiError> {
        let reply = self.into_reply::<serde::de::IgnoredAny>()?;
        Ok(Reply {
            data: (),
            message: reply.message,
        })
    }
}

/// Accepted call: the typed payload plus the server's message, if it sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub data: T,
    pub message: Option<String>,
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            data: f(self.data),
            message: self.message,
        }
    }
}

impl<T> Reply<Option<T>> {
    /// Treat a missing payload as a decode failure.
    pub fn required(self) -> Result<Reply<T>, ApiError> {
        match self.data {
            Some(data) => Ok(Reply {
                data,
                message: self.message,
            }),
            None => Err(ApiError::Decode("response payload is missing".to_string())),
        }
    }
}

/// The remote content API as seen by the workflows.
#[async_trait]
pub trait CmsApi: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError>;

    async fn create_tag(&self, request: &CreateTagRequest) -> Result<Reply<Tag>, ApiError>;

    async fn update_tag(&self, id: &str, request: &UpdateTagRequest)
        -> Result<Reply<Tag>, ApiError>;

    async fn delete_tag(&self, id: &str) -> Result<Reply<()>, ApiError>;

    /// Posts authored by the signed-in user, with their direct children.
    async fn list_own_posts(&self) -> Result<Vec<PostSummary>, ApiError>;

    async fn list_posts(&self) -> Result<Vec<PostSummary>, ApiError>;

    async fn create_post(&self, draft: &DraftPost) -> Result<Reply<()>, ApiError>;

    async fn update_post(&self, id: &str, draft: &DraftPost) -> Result<Reply<()>, ApiError>;

    /// Store a file and return its public URL.
    async fn upload_file(&self, file: UploadFile) -> Result<Reply<String>, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<Reply<AuthPayload>, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<Reply<AuthPayload>, ApiError>;
}

#[async_trait]
impl CmsApi for ApiClient {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        tags::list(self).await
    }

    async fn create_tag(&self, request: &CreateTagRequest) -> Result<Reply<Tag>, ApiError> {
        tags::create(self, request).await
    }

    async fn update_tag(
        &self,
        id: &str,
        request: &UpdateTagRequest,
    ) -> Result<Reply<Tag>, ApiError> {
        tags::update(self, id, request).await
    }

    async fn delete_tag(&self, id: &str) -> Result<Reply<()>, ApiError> {
        tags::delete(self, id).await
    }

    async fn list_own_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        posts::list_own(self).await
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        posts::list_all(self).await
    }

    async fn create_post(&self, draft: &DraftPost) -> Result<Reply<()>, ApiError> {
        posts::create(self, draft).await
    }

    async fn update_post(&self, id: &str, draft: &DraftPost) -> Result<Reply<()>, ApiError> {
        posts::update(self, id, draft).await
    }

    async fn upload_file(&self, file: UploadFile) -> Result<Reply<String>, ApiError> {
        uploads::upload(self, file).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Reply<AuthPayload>, ApiError> {
        auth::login(self, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Reply<AuthPayload>, ApiError> {
        auth::register(self, request).await
    }
}
