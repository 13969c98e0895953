//! Shared test support for the portal crates.
//!
//! - [`ScriptedTransport`]: an [`HttpTransport`](cjk_auth::HttpTransport) that
//!   answers from per-route scripts and records every request.
//! - [`ManualClock`]: a clock tests move by hand.
//! - Token and member builders, plus JSON fixtures under `data/`.

mod clock;
mod tokens;
mod transport;

pub use clock::ManualClock;
pub use tokens::{member_json, mint_access_token, mint_token_with_claims, token_response};
pub use transport::{ScriptedTransport, BASE_URL};

use std::path::PathBuf;

use cjk_core::config::PortalConfig;
use serde::de::DeserializeOwned;

/// Config pointing at [`BASE_URL`] with default auth settings.
pub fn test_config() -> PortalConfig {
    let mut config = PortalConfig::default();
    config.api.base_url = BASE_URL.to_string();
    config
}

/// Root directory of the JSON fixtures.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Raw text of a fixture file, for scripting response bodies.
pub fn fixture_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}
