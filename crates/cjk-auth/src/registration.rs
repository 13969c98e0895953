//! Member registration with local pre-validation.

use cjk_core::errors::AuthError;
use cjk_core::models::NewMember;
use serde_json::Value;

use crate::client::AuthClient;
use crate::clock::Clock;
use crate::store::TokenStore;
use crate::transport::HttpTransport;

const MIN_PASSWORD_LEN: usize = 8;
const GENERIC_REJECTION: &str = "registration failed";

/// Usernames may hold ASCII letters, digits and `@ . + - _` only.
pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if username.is_empty() || !username.chars().all(allowed) {
        return Err(AuthError::InvalidField {
            field: "username".into(),
            message: "only letters, digits and @ . + - _ are allowed".into(),
        });
    }
    Ok(())
}

/// Coarse password rating shown while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Which composition rules a password satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    pub length: bool,
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub special: bool,
}

impl PasswordChecks {
    pub fn of(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_PASSWORD_LEN,
            lower: password.chars().any(|c| c.is_ascii_lowercase()),
            upper: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    /// Number of satisfied rules, 0 to 5.
    pub fn score(&self) -> u8 {
        [self.length, self.lower, self.upper, self.digit, self.special]
            .into_iter()
            .filter(|ok| *ok)
            .count() as u8
    }

    pub fn strength(&self) -> PasswordStrength {
        match self.score() {
            0..=2 => PasswordStrength::Weak,
            3..=4 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }

    /// All five rules hold.
    pub fn is_strong(&self) -> bool {
        self.score() == 5
    }
}

/// First human-readable message in a rejection body.
///
/// Accepts `{field: [msg, ..]}`, `{field: msg}` or a bare JSON string.
pub fn first_error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body).ok()? {
        Value::String(message) => Some(message),
        Value::Object(fields) => fields.into_iter().find_map(|(_, value)| match value {
            Value::Array(items) => items.into_iter().next().map(|first| match first {
                Value::String(s) => s,
                other => other.to_string(),
            }),
            Value::String(s) => Some(s),
            _ => None,
        }),
        _ => None,
    }
}

impl<T, S, C> AuthClient<T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Create a member account. Does not sign in.
    pub async fn register(&self, member: &NewMember) -> Result<(), AuthError> {
        validate_username(&member.username)?;
        if !PasswordChecks::of(&member.password).is_strong() {
            return Err(AuthError::InvalidField {
                field: "password".into(),
                message: format!(
                    "at least {MIN_PASSWORD_LEN} characters with upper and lower case, a digit and a special character"
                ),
            });
        }

        let response = self.post_anonymous(&self.auth.register_path, member).await?;
        if !response.is_success() {
            let body = first_error_message(&response.body)
                .unwrap_or_else(|| GENERIC_REJECTION.to_string());
            tracing::warn!(status = response.status, username = %member.username, "registration rejected");
            return Err(AuthError::RegistrationRejected {
                status: response.status,
                body,
            });
        }

        tracing::info!(username = %member.username, "member registered");
        Ok(())
    }
}
