//! # cjk-content
//!
//! Blog, news, activities and gallery reads, staff editing, likes and
//! comments. Every call goes through the authorized request layer of
//! [`cjk_auth::AuthClient`], so expired credentials are renewed transparently
//! and an unrecoverable 401 surfaces as `RequestError::Unauthorized`.

pub mod api;
pub mod editorial;
pub mod gallery;
pub mod presentation;
pub mod reads;
pub mod social;

pub use api::{ActivityFilter, BlogFilter, ContentApi, NewsFilter};
pub use editorial::ContentDraft;
pub use gallery::NewGalleryItem;
