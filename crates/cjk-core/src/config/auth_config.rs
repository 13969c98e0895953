use serde::{Deserialize, Serialize};

use super::defaults;

/// Session and credential handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Key the credential pair is persisted under.
    pub storage_key: String,
    /// Seconds subtracted from a token's `exp` claim before it counts as expired.
    pub expiry_skew_secs: i64,
    /// Login exchange endpoint.
    pub token_path: String,
    /// Refresh exchange endpoint.
    pub refresh_path: String,
    /// Current member profile endpoint.
    pub me_path: String,
    /// Member registration endpoint.
    pub register_path: String,
    /// Share one in-flight refresh between callers that hit a 401 together.
    pub dedupe_refresh: bool,
    /// Directory used by the file-backed credential store.
    pub store_dir: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage_key: defaults::DEFAULT_STORAGE_KEY.to_string(),
            expiry_skew_secs: defaults::DEFAULT_EXPIRY_SKEW_SECS,
            token_path: defaults::DEFAULT_TOKEN_PATH.to_string(),
            refresh_path: defaults::DEFAULT_REFRESH_PATH.to_string(),
            me_path: defaults::DEFAULT_ME_PATH.to_string(),
            register_path: defaults::DEFAULT_REGISTER_PATH.to_string(),
            dedupe_refresh: defaults::DEFAULT_DEDUPE_REFRESH,
            store_dir: defaults::DEFAULT_STORE_DIR.to_string(),
        }
    }
}
