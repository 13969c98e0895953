use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content API, without a trailing slash.
    pub base_url: String,
    /// Transport timeout in seconds. The request layer itself never times out.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Base URL with any trailing `/` removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
        }
    }
}
