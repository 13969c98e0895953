//! The authorized API client shared by every protected operation.

use cjk_core::config::{AuthConfig, PortalConfig};
use cjk_core::models::CredentialPair;
use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::store::TokenStore;
use crate::transport::HttpTransport;

/// Client for the portal API.
///
/// Owns the transport, the credential store and the clock. Refresh,
/// ensure-valid-access, the authorized request layer, login and registration
/// are implemented on this type in their own modules.
pub struct AuthClient<T, S, C = SystemClock> {
    pub(crate) transport: T,
    pub(crate) store: S,
    pub(crate) clock: C,
    pub(crate) base_url: String,
    pub(crate) auth: AuthConfig,
    /// Serializes refresh exchanges when `auth.dedupe_refresh` is set.
    pub(crate) refresh_gate: Mutex<()>,
}

impl<T, S> AuthClient<T, S, SystemClock>
where
    T: HttpTransport,
    S: TokenStore,
{
    pub fn new(transport: T, store: S, config: &PortalConfig) -> Self {
        Self::with_clock(transport, store, SystemClock, config)
    }
}

impl<T, S, C> AuthClient<T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    pub fn with_clock(transport: T, store: S, clock: C, config: &PortalConfig) -> Self {
        Self {
            transport,
            store,
            clock,
            base_url: config.api.normalized_base_url().to_string(),
            auth: config.auth.clone(),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth
    }

    /// The stored pair, if any.
    pub fn credentials(&self) -> Option<CredentialPair> {
        self.store.get()
    }

    /// Whether `access` counts as expired now, with the configured skew.
    pub fn is_expired(&self, access: &str) -> bool {
        codec::is_expired_with(access, self.auth.expiry_skew_secs, &self.clock)
    }

    /// Absolute URL for `path`. A missing leading `/` is added; query
    /// parameters with empty values are dropped.
    pub fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = String::with_capacity(self.base_url.len() + path.len() + 1);
        url.push_str(&self.base_url);
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);

        let mut separator = if url.contains('?') { '&' } else { '?' };
        for (key, value) in query.iter().filter(|(_, v)| !v.is_empty()) {
            url.push(separator);
            push_query_component(&mut url, key);
            url.push('=');
            push_query_component(&mut url, value);
            separator = '&';
        }
        url
    }
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Append `component` to `url`, percent-encoding every byte outside the
/// RFC 3986 unreserved set.
fn push_query_component(url: &mut String, component: &str) {
    for byte in component.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            url.push(char::from(byte));
        } else {
            url.push('%');
            url.push(char::from(HEX[usize::from(byte >> 4)]));
            url.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DetachedTokenStore;
    use crate::transport::{HttpRequest, HttpResponse};
    use cjk_core::errors::RequestError;

    struct Offline;

    impl HttpTransport for Offline {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, RequestError> {
            Err(RequestError::Transport {
                reason: "offline".into(),
            })
        }
    }

    fn client(base: &str) -> AuthClient<Offline, DetachedTokenStore> {
        let mut config = PortalConfig::default();
        config.api.base_url = base.into();
        AuthClient::new(Offline, DetachedTokenStore, &config)
    }

    #[test]
    fn url_normalizes_path_and_base() {
        let c = client("http://api.test/");
        assert_eq!(c.url("api/news/", &[]), "http://api.test/api/news/");
        assert_eq!(c.url("/api/news/", &[]), "http://api.test/api/news/");
    }

    #[test]
    fn url_skips_empty_params_and_encodes() {
        let c = client("http://api.test");
        let query = vec![
            ("category".to_string(), String::new()),
            ("q".to_string(), "a b&c".to_string()),
            ("is_published".to_string(), "true".to_string()),
        ];
        assert_eq!(
            c.url("/api/blog/posts/", &query),
            "http://api.test/api/blog/posts/?q=a%20b%26c&is_published=true"
        );
    }

    #[test]
    fn url_encodes_multibyte_values() {
        let c = client("http://api.test");
        let query = vec![("content_type_str".to_string(), "activité~1".to_string())];
        assert_eq!(
            c.url("/api/social/comments/", &query),
            "http://api.test/api/social/comments/?content_type_str=activit%C3%A9~1"
        );
    }

    #[test]
    fn url_appends_to_existing_query() {
        let c = client("http://api.test");
        let query = vec![("page".to_string(), "2".to_string())];
        assert_eq!(c.url("/api/news/?x=1", &query), "http://api.test/api/news/?x=1&page=2");
    }
}
