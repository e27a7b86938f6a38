//! Domain layer: value objects, content entities and their field schemas.

pub mod auth;
pub mod banner;
pub mod blog;
pub mod category;
pub mod content;
pub mod internal_link;
pub mod localized;
pub mod project;
pub mod schema;
pub mod seo;
pub mod service;
pub mod types;
