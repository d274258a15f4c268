//! In-memory stand-in for the content API, shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::api::{CmsApi, Reply, UploadFile};
use crate::auth::Session;
use crate::errors::ApiError;
use crate::models::{
    AuthPayload, CreateTagRequest, DraftPost, LoginRequest, PostSummary, RegisterRequest, RoleRef,
    Tag, UpdateTagRequest, UserAccount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListTags,
    CreateTag,
    UpdateTag,
    DeleteTag,
    OwnPosts,
    AllPosts,
    CreatePost,
    UpdatePost,
    Upload,
    Login,
    Register,
}

#[derive(Default)]
pub struct FakeApi {
    pub tags: Mutex<Vec<Tag>>,
    pub own_posts: Mutex<Vec<PostSummary>>,
    pub all_posts: Mutex<Vec<PostSummary>>,
    pub submitted: Mutex<Vec<(Option<String>, DraftPost)>>,
    pub account: Mutex<Option<AuthPayload>>,
    failures: Mutex<HashMap<Endpoint, String>>,
    gates: Mutex<HashMap<Endpoint, Arc<Semaphore>>>,
    calls: Mutex<Vec<Endpoint>>,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    pub fn with_tags(self, tags: &[(&str, &str)]) -> Self {
        *self.tags.lock().unwrap() = tags.iter().map(|(id, name)| tag(id, name)).collect();
        self
    }

    pub fn with_own_posts(self, posts: Vec<PostSummary>) -> Self {
        *self.own_posts.lock().unwrap() = posts;
        self
    }

    pub fn with_all_posts(self, posts: Vec<PostSummary>) -> Self {
        *self.all_posts.lock().unwrap() = posts;
        self
    }

    pub fn with_account(self, payload: AuthPayload) -> Self {
        *self.account.lock().unwrap() = Some(payload);
        self
    }

    /// Reject every following call to `endpoint` with `message`.
    pub fn fail(&self, endpoint: Endpoint, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(endpoint, message.to_string());
    }

    pub fn succeed(&self, endpoint: Endpoint) {
        self.failures.lock().unwrap().remove(&endpoint);
    }

    /// Block calls to `endpoint` until the test adds permits to the returned semaphore.
    pub fn gate(&self, endpoint: Endpoint) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates.lock().unwrap().insert(endpoint, gate.clone());
        gate
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|e| **e == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn enter(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(endpoint);

        let gate = self.gates.lock().unwrap().get(&endpoint).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        match self.failures.lock().unwrap().get(&endpoint) {
            Some(message) => Err(ApiError::Rejected {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CmsApi for FakeApi {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.enter(Endpoint::ListTags).await?;
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn create_tag(&self, request: &CreateTagRequest) -> Result<Reply<Tag>, ApiError> {
        self.enter(Endpoint::CreateTag).await?;
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t.name == request.name) {
            return Err(ApiError::Rejected {
                message: "The name has already been taken.".to_string(),
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let created = tag(&id, &request.name);
        tags.push(created.clone());
        Ok(Reply {
            data: created,
            message: Some("Tag created successfully".to_string()),
        })
    }

    async fn update_tag(
        &self,
        id: &str,
        request: &UpdateTagRequest,
    ) -> Result<Reply<Tag>, ApiError> {
        self.enter(Endpoint::UpdateTag).await?;
        let mut tags = self.tags.lock().unwrap();
        let existing = tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::Rejected {
                message: "Tag not found".to_string(),
            })?;
        *existing = tag(id, &request.name);
        Ok(Reply {
            data: existing.clone(),
            message: Some("Tag updated successfully".to_string()),
        })
    }

    async fn delete_tag(&self, id: &str) -> Result<Reply<()>, ApiError> {
        self.enter(Endpoint::DeleteTag).await?;
        self.tags.lock().unwrap().retain(|t| t.id != id);
        Ok(Reply {
            data: (),
            message: Some("Tag deleted successfully".to_string()),
        })
    }

    async fn list_own_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        self.enter(Endpoint::OwnPosts).await?;
        Ok(self.own_posts.lock().unwrap().clone())
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        self.enter(Endpoint::AllPosts).await?;
        Ok(self.all_posts.lock().unwrap().clone())
    }

    async fn create_post(&self, draft: &DraftPost) -> Result<Reply<()>, ApiError> {
        self.enter(Endpoint::CreatePost).await?;
        self.submitted.lock().unwrap().push((None, draft.clone()));
        Ok(Reply {
            data: (),
            message: Some("Post created successfully".to_string()),
        })
    }

    async fn update_post(&self, id: &str, draft: &DraftPost) -> Result<Reply<()>, ApiError> {
        self.enter(Endpoint::UpdatePost).await?;
        self.submitted
            .lock()
            .unwrap()
            .push((Some(id.to_string()), draft.clone()));
        Ok(Reply {
            data: (),
            message: Some("Post updated successfully".to_string()),
        })
    }

    async fn upload_file(&self, file: UploadFile) -> Result<Reply<String>, ApiError> {
        self.enter(Endpoint::Upload).await?;
        Ok(Reply {
            data: format!("https://cdn.example.org/{}", file.file_name),
            message: None,
        })
    }

    async fn login(&self, _request: &LoginRequest) -> Result<Reply<AuthPayload>, ApiError> {
        self.enter(Endpoint::Login).await?;
        self.account_reply()
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<Reply<AuthPayload>, ApiError> {
        self.enter(Endpoint::Register).await?;
        self.account_reply()
    }
}

impl FakeApi {
    fn account_reply(&self) -> Result<Reply<AuthPayload>, ApiError> {
        let account = self.account.lock().unwrap().clone();
        account
            .map(|data| Reply {
                data,
                message: None,
            })
            .ok_or_else(|| ApiError::Rejected {
                message: "Invalid credentials".to_string(),
            })
    }
}

pub fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

pub fn post(id: &str, title: &str, children: Vec<PostSummary>) -> PostSummary {
    PostSummary {
        id: id.to_string(),
        title: title.to_string(),
        children,
    }
}

pub fn account(roles: &[&str]) -> UserAccount {
    UserAccount {
        email: "editor@example.org".to_string(),
        first_name: Some("Ana".to_string()),
        last_name: Some("Silva".to_string()),
        roles: roles
            .iter()
            .map(|r| RoleRef {
                name: r.to_string(),
            })
            .collect(),
        experience: None,
        association: None,
        initiation: None,
    }
}

pub fn session(roles: &[&str]) -> Session {
    Session::new("test-token", account(roles), Utc::now())
}

/// Yield to the runtime until `check` passes. Panics after a generous number of rounds.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..1_000 {
        if check().await {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }
    panic!("condition not reached");
}
