//! DSS Admin
//!
//! Post authoring and taxonomy workflow for the DSS content API: tag
//! reconciliation, parent/related post linking and post submission, plus
//! sign-in, tag administration and image upload.

pub mod api;
pub mod auth;
pub mod composer;
pub mod config;
pub mod document;
pub mod errors;
pub mod models;
pub mod notify;
pub mod relations;
pub mod taxonomy;
pub mod validation;

pub use api::{ApiClient, CmsApi};
pub use composer::{EditTarget, Phase, PostComposer};
pub use config::Config;
pub use errors::{ApiError, AppError};

#[cfg(test)]
mod testing;
