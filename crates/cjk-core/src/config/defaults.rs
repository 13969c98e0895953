// Single source of truth for all default values.

// --- API ---
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// --- Auth ---
pub const DEFAULT_STORAGE_KEY: &str = "cjk_auth_tokens";
pub const DEFAULT_EXPIRY_SKEW_SECS: i64 = 30;
pub const DEFAULT_TOKEN_PATH: &str = "/api/auth/token/";
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/token/refresh/";
pub const DEFAULT_ME_PATH: &str = "/api/members/me/";
pub const DEFAULT_REGISTER_PATH: &str = "/api/members/";
pub const DEFAULT_DEDUPE_REFRESH: bool = true;
pub const DEFAULT_STORE_DIR: &str = ".cjk";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

// --- Config file ---
pub const DEFAULT_CONFIG_FILENAME: &str = "cjk.toml";
