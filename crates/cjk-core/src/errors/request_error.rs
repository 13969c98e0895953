/// Failures surfaced by the authenticated request layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The credential was rejected and could not be renewed. The user must
    /// authenticate again.
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success response.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {reason}")]
    Parse { reason: String },

    #[error("transport failure: {reason}")]
    Transport { reason: String },
}

impl RequestError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Status { status, .. } => Some(*status),
            Self::Parse { .. } | Self::Transport { .. } => None,
        }
    }
}
