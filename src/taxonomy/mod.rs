//! Tag catalog reconciliation.
//!
//! The resolver turns the remote tag catalog into options and creates tags on
//! demand. It never owns selection state: callers merge a created option into
//! their catalog and selection in one update via [`absorb_created`].

mod index;

pub use index::TagIndex;

use std::sync::Arc;

use crate::api::{CmsApi, Reply};
use crate::errors::{AppError, FetchTarget};
use crate::models::{CreateTagRequest, OptionSet, SelectOption};
use crate::validation::{Rule, ValidationErrors};

pub struct TaxonomyResolver<A> {
    api: Arc<A>,
}

impl<A> Clone for TaxonomyResolver<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: CmsApi> TaxonomyResolver<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetch every tag as an option, in catalog order.
    pub async fn load_catalog(&self) -> Result<Vec<SelectOption>, AppError> {
        let tags = self
            .api
            .list_tags()
            .await
            .map_err(|e| AppError::fetch(FetchTarget::Tags, e))?;
        Ok(tags.iter().map(SelectOption::from).collect())
    }

    /// Ask the API to create a tag named `label`. Nothing is retried or kept on failure.
    pub async fn create(&self, label: &str) -> Result<Reply<SelectOption>, AppError> {
        let name = label.trim();
        if name.is_empty() {
            return Err(ValidationErrors::single("tag", Rule::Required).into());
        }

        let reply = self
            .api
            .create_tag(&CreateTagRequest {
                name: name.to_string(),
            })
            .await
            .map_err(AppError::submission)?;

        tracing::info!(id = %reply.data.id, name = %reply.data.name, "Tag created");
        Ok(reply.map(|tag| SelectOption::from(&tag)))
    }
}

/// Make a newly created option selectable again and select it.
pub fn absorb_created(catalog: &mut OptionSet, selection: &mut OptionSet, option: SelectOption) {
    catalog.insert(option.clone());
    selection.insert(option);
}

/// Replace the catalog with a fetched one, keeping options created locally
/// that the fetch did not include yet.
pub fn merge_fetched(catalog: &mut OptionSet, fetched: Vec<SelectOption>) {
    let mut merged: OptionSet = fetched.into_iter().collect();
    for option in catalog.iter() {
        merged.insert(option.clone());
    }
    *catalog = merged;
}
