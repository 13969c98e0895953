//! # cjk-core
//!
//! Foundation crate for the CJK portal client.
//! Defines the error taxonomy, layered configuration, and the wire models
//! exchanged with the remote content API. Every other crate depends on this.

pub mod config;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::PortalConfig;
pub use errors::{
    AuthError, ConfigError, PortalError, PortalResult, RequestError, StorageError,
};
pub use models::{CredentialPair, ListResponse, Member};
