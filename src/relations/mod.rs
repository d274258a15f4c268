//! Parent and related post candidates.

use std::sync::Arc;

use crate::api::CmsApi;
use crate::errors::{AppError, FetchTarget};
use crate::models::{OptionSet, PostSummary, SelectOption};

pub struct RelationshipSelector<A> {
    api: Arc<A>,
}

impl<A> Clone for RelationshipSelector<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: CmsApi> RelationshipSelector<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// The user's own posts, each followed by its direct children.
    pub async fn load_parent_candidates(&self) -> Result<Vec<SelectOption>, AppError> {
        let posts = self
            .api
            .list_own_posts()
            .await
            .map_err(|e| AppError::fetch(FetchTarget::OwnPosts, e))?;
        Ok(flatten_parent_options(&posts))
    }

    pub async fn load_related_candidates(&self) -> Result<Vec<SelectOption>, AppError> {
        let posts = self
            .api
            .list_posts()
            .await
            .map_err(|e| AppError::fetch(FetchTarget::AllPosts, e))?;
        Ok(posts.iter().map(SelectOption::from).collect())
    }
}

/// One level only: grandchildren are dropped.
pub fn flatten_parent_options(posts: &[PostSummary]) -> Vec<SelectOption> {
    posts
        .iter()
        .flat_map(|parent| {
            std::iter::once(SelectOption::from(parent))
                .chain(parent.children.iter().map(SelectOption::from))
        })
        .collect()
}

/// Replaces whatever parent was chosen before.
pub fn choose_parent(current: &mut Option<SelectOption>, option: SelectOption) {
    *current = Some(option);
}

/// Returns false when the post was already related.
pub fn add_related(related: &mut OptionSet, option: SelectOption) -> bool {
    related.insert(option)
}
