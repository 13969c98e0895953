use serde::{Deserialize, Serialize};

/// The (access, refresh) tuple persisted together.
///
/// Access and refresh are always saved and cleared as one unit; storage never
/// holds one without the other.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived bearer token authorizing API calls.
    pub access: String,
    /// Long-lived bearer token used only to mint new access tokens.
    pub refresh: String,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Replace the access token, keeping the refresh token unless the server
    /// rotated it.
    pub fn renewed(&self, access: String, rotated_refresh: Option<String>) -> Self {
        Self {
            access,
            refresh: rotated_refresh.unwrap_or_else(|| self.refresh.clone()),
        }
    }
}

// Tokens stay out of logs and panic messages.
impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_len", &self.access.len())
            .field("refresh_len", &self.refresh.len())
            .finish()
    }
}

/// Body of the login exchange.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of the refresh exchange.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response of the login exchange. Both fields are optional on the wire so a
/// malformed success can be told apart from a transport failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl TokenResponse {
    /// The usable access token, if the body carried a non-empty one.
    pub fn usable_access(&self) -> Option<&str> {
        self.access.as_deref().filter(|a| !a.is_empty())
    }

    /// A complete pair, if both tokens are present and non-empty.
    pub fn into_pair(self) -> Option<CredentialPair> {
        match (self.access, self.refresh) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(CredentialPair { access, refresh })
            }
            _ => None,
        }
    }
}
