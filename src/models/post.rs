//! Post models: reference summaries and the submission payload.

use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A post as listed by the API. Only used as selectable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<PostSummary>,
}

/// `response` payload of the post listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PostListPayload {
    #[serde(default)]
    pub posts: Vec<PostSummary>,
}

/// Payload sent to create or update a post.
///
/// `parent_id` is always serialized; an absent parent is an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPost {
    pub title: String,
    pub priority: String,
    pub description: String,
    pub parent_id: Option<String>,
    pub related: Vec<String>,
    pub tags: Vec<String>,
}
