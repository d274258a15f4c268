//! Tag administration list.

use std::sync::Arc;

use crate::api::CmsApi;
use crate::errors::{AppError, FetchTarget};
use crate::models::{Tag, UpdateTagRequest};
use crate::notify::Notifier;
use crate::validation::{Rule, ValidationErrors};

/// Local copy of the tag list with server-confirmed edits.
pub struct TagIndex<A> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    tags: Vec<Tag>,
}

impl<A: CmsApi> TagIndex<A> {
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            tags: Vec::new(),
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Reload the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<&[Tag], AppError> {
        match self.api.list_tags().await {
            Ok(tags) => {
                self.tags = tags;
                Ok(&self.tags)
            }
            Err(e) => {
                let err = AppError::fetch(FetchTarget::Tags, e);
                self.notifier.error(&err.message());
                Err(err)
            }
        }
    }

    /// The tag leaves the local list only once the server confirms.
    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        match self.api.delete_tag(id).await {
            Ok(reply) => {
                self.tags.retain(|t| t.id != id);
                if let Some(message) = reply.message {
                    self.notifier.success(&message);
                }
                tracing::info!(id, "Tag deleted");
                Ok(())
            }
            Err(e) => {
                let err = AppError::submission(e);
                self.notifier.error(&err.message());
                Err(err)
            }
        }
    }

    pub async fn rename(&mut self, id: &str, name: &str) -> Result<Tag, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationErrors::single("name", Rule::Required).into());
        }

        let request = UpdateTagRequest {
            name: name.to_string(),
        };
        match self.api.update_tag(id, &request).await {
            Ok(reply) => {
                let updated = reply.data;
                if let Some(existing) = self.tags.iter_mut().find(|t| t.id == updated.id) {
                    *existing = updated.clone();
                }
                if let Some(message) = reply.message {
                    self.notifier.success(&message);
                }
                Ok(updated)
            }
            Err(e) => {
                let err = AppError::submission(e);
                self.notifier.error(&err.message());
                Err(err)
            }
        }
    }
}
