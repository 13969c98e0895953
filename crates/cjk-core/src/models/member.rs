use serde::{Deserialize, Serialize};

/// Profile of the authenticated member, as returned by `/api/members/me/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub quartier: Option<String>,
    #[serde(default)]
    pub date_naissance: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub date_inscription: Option<String>,
    #[serde(default)]
    pub is_active_member: bool,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
}

impl Member {
    /// Staff or superuser members get authoring and moderation capabilities.
    pub fn is_official(&self) -> bool {
        self.is_staff.unwrap_or(false) || self.is_superuser.unwrap_or(false)
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Registration payload for `POST /api/members/`.
#[derive(Clone, Default, Serialize)]
pub struct NewMember {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub quartier: String,
    pub date_naissance: String,
}

impl std::fmt::Debug for NewMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewMember")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
