//! Error handling for the portal client.
//! One error enum per subsystem, `thiserror` only.

pub mod auth_error;
pub mod config_error;
pub mod request_error;
pub mod storage_error;

pub use auth_error::AuthError;
pub use config_error::ConfigError;
pub use request_error::RequestError;
pub use storage_error::StorageError;

/// Top-level error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PortalError {
    /// True when the caller should send the user back to the login surface.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Request(e) => e.is_unauthorized(),
            Self::Auth(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
