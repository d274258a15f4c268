//! Data models for the DSS content API.
//!
//! Field names follow the API's JSON exactly; ids are normalised to strings.

mod option;
mod post;
mod route;
mod tag;
mod user;

pub use option::*;
pub use post::*;
pub use route::*;
pub use tag::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Accept an id encoded either as a JSON string or as an integer.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}
