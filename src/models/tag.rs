//! Tag model matching the API's tag resource.

use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A label used to categorise posts. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Request body for creating a new tag.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Request body for renaming an existing tag.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTagRequest {
    pub name: String,
}

/// `response` payload of `GET tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagListPayload {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// `response` payload of `POST tags` and `PUT tags/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagPayload {
    pub tag: Tag,
}
