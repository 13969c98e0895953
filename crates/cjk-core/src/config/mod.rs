//! Portal client configuration with layered resolution.

pub mod api_config;
pub mod auth_config;
pub mod defaults;
pub mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use api_config::ApiConfig;
pub use auth_config::AuthConfig;
pub use observability_config::ObservabilityConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CJK_*`)
/// 2. Config file (`cjk.toml`, or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub observability: ObservabilityConfig,
}

impl PortalConfig {
    /// Load configuration from `path`, or from `cjk.toml` in the working
    /// directory when no path is given, then apply environment overrides.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(defaults::DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `CJK_*` overrides read through `lookup`. Unparseable numeric or
    /// boolean values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CJK_API_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = lookup("CJK_API_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                self.api.timeout_secs = v;
            }
        }
        if let Some(val) = lookup("CJK_AUTH_STORAGE_KEY") {
            self.auth.storage_key = val;
        }
        if let Some(val) = lookup("CJK_AUTH_EXPIRY_SKEW_SECS") {
            if let Ok(v) = val.parse::<i64>() {
                self.auth.expiry_skew_secs = v;
            }
        }
        if let Some(val) = lookup("CJK_AUTH_DEDUPE_REFRESH") {
            if let Ok(v) = val.parse::<bool>() {
                self.auth.dedupe_refresh = v;
            }
        }
        if let Some(val) = lookup("CJK_AUTH_STORE_DIR") {
            self.auth.store_dir = val;
        }
        if let Some(val) = lookup("CJK_LOG_LEVEL") {
            self.observability.log_level = val;
        }
        if let Some(val) = lookup("CJK_LOG_JSON") {
            if let Ok(v) = val.parse::<bool>() {
                self.observability.json = v;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.normalized_base_url();
        if base.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "api.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                field: "api.base_url".to_string(),
                message: "must use http or https".to_string(),
            });
        }
        if self.auth.storage_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "auth.storage_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.auth.expiry_skew_secs < 0 {
            return Err(ConfigError::ValidationFailed {
                field: "auth.expiry_skew_secs".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        for (field, path) in [
            ("auth.token_path", &self.auth.token_path),
            ("auth.refresh_path", &self.auth.refresh_path),
            ("auth.me_path", &self.auth.me_path),
            ("auth.register_path", &self.auth.register_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must start with '/'".to_string(),
                });
            }
        }
        Ok(())
    }
}
