//! Token refresh protocol and ensure-valid-access.
//!
//! A refresh exchanges the stored refresh token for a new access token. When
//! the server refuses, the stored pair is dropped and the caller gets `None`;
//! refresh failures are never raised as errors.

use cjk_core::models::{CredentialPair, RefreshRequest, TokenResponse};
use cjk_observability::events;

use crate::client::AuthClient;
use crate::clock::Clock;
use crate::store::TokenStore;
use crate::transport::{HttpRequest, HttpTransport, Method};

impl<T, S, C> AuthClient<T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns the renewed pair, already persisted, or `None` when there is
    /// nothing to refresh or the exchange failed.
    pub async fn refresh(&self) -> Option<CredentialPair> {
        if self.auth.dedupe_refresh {
            let _gate = self.refresh_gate.lock().await;
            self.exchange_refresh().await
        } else {
            self.exchange_refresh().await
        }
    }

    /// An access token believed to be valid, refreshing first when the stored
    /// one has expired. `None` means the user has no usable session.
    pub async fn ensure_valid_access_token(&self) -> Option<String> {
        let pair = self.store.get()?;
        if !self.is_expired(&pair.access) {
            return Some(pair.access);
        }

        tracing::debug!("stored access token expired, refreshing");
        self.refresh_after_rejection(Some(&pair.access))
            .await
            .map(|renewed| renewed.access)
    }

    /// Refresh because `stale` was rejected or found expired.
    ///
    /// With deduplication on, callers queue on one gate; a caller that finds
    /// the store already holding a different, unexpired access token takes it
    /// instead of issuing another exchange.
    pub(crate) async fn refresh_after_rejection(
        &self,
        stale: Option<&str>,
    ) -> Option<CredentialPair> {
        if !self.auth.dedupe_refresh {
            return self.exchange_refresh().await;
        }

        let _gate = self.refresh_gate.lock().await;
        if let Some(current) = self.store.get() {
            if stale != Some(current.access.as_str()) && !self.is_expired(&current.access) {
                tracing::debug!("access token already renewed by a concurrent caller");
                return Some(current);
            }
        }
        self.exchange_refresh().await
    }

    async fn exchange_refresh(&self) -> Option<CredentialPair> {
        let current = self.store.get().filter(|p| !p.refresh.is_empty())?;

        let body = serde_json::to_string(&RefreshRequest {
            refresh: &current.refresh,
        })
        .ok()?;
        let mut request = HttpRequest::new(Method::Post, self.url(&self.auth.refresh_path, &[]));
        request.set_header("Content-Type", "application/json");
        request.set_header("Accept", "application/json");
        request.body = Some(body);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                // No answer from the server says nothing about the token.
                tracing::warn!(error = %e, "refresh exchange did not reach the server");
                return None;
            }
        };

        // The store may have been cleared or replaced while the exchange was
        // in flight. Only the pair it started from may be renewed or dropped.
        match self.store.get() {
            Some(stored) if stored.refresh == current.refresh => {}
            Some(stored) => {
                tracing::debug!("stored credentials replaced during refresh, answer discarded");
                return Some(stored).filter(|p| !self.is_expired(&p.access));
            }
            None => {
                tracing::debug!("stored credentials cleared during refresh, answer discarded");
                return None;
            }
        }

        if !response.is_success() {
            self.drop_credentials();
            events::refresh_rejected(response.status);
            return None;
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body).unwrap_or_default();
        let Some(access) = parsed.usable_access().map(str::to_string) else {
            tracing::warn!(status = response.status, "refresh response carried no access token");
            self.drop_credentials();
            return None;
        };

        let rotated = parsed.refresh.filter(|r| !r.is_empty());
        let rotated_flag = rotated.is_some();
        let renewed = current.renewed(access, rotated);
        if let Err(e) = self.store.save(&renewed) {
            tracing::warn!(error = %e, "failed to persist renewed credentials");
        }

        events::token_refreshed(rotated_flag);
        Some(renewed)
    }

    pub(crate) fn drop_credentials(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored credentials");
        }
    }
}
