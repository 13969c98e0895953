use super::{RequestError, StorageError};

/// Authentication flow errors (login, registration, identity lookups).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login rejected (HTTP {status})")]
    LoginRejected { status: u16 },

    #[error("registration rejected (HTTP {status}): {body}")]
    RegistrationRejected { status: u16, body: String },

    #[error("no stored credentials, sign in first")]
    MissingCredentials,

    #[error("invalid registration field {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("credential storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::MissingCredentials => true,
            Self::Request(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}
