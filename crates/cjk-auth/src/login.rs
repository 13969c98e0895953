//! Login exchange.

use cjk_core::errors::{AuthError, RequestError};
use cjk_core::models::{CredentialPair, LoginRequest, TokenResponse};
use cjk_observability::events;
use serde::Serialize;

use crate::client::AuthClient;
use crate::clock::Clock;
use crate::store::TokenStore;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

impl<T, S, C> AuthClient<T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Exchange username and password for a credential pair and persist it.
    ///
    /// On rejection the store is left untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<CredentialPair, AuthError> {
        let response = self
            .post_anonymous(&self.auth.token_path, &LoginRequest { username, password })
            .await?;

        if !response.is_success() {
            events::login_rejected(username, response.status);
            return Err(AuthError::LoginRejected {
                status: response.status,
            });
        }

        let pair = serde_json::from_str::<TokenResponse>(&response.body)
            .ok()
            .and_then(TokenResponse::into_pair)
            .ok_or_else(|| RequestError::Parse {
                reason: "login response did not carry an access and refresh token".into(),
            })?;

        self.store.save(&pair)?;
        events::logged_in(username);
        Ok(pair)
    }

    /// POST a JSON body without credentials.
    pub(crate) async fn post_anonymous<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, RequestError> {
        let body = serde_json::to_string(body).map_err(|e| RequestError::Parse {
            reason: format!("failed to encode request body: {e}"),
        })?;

        let mut request = HttpRequest::new(Method::Post, self.url(path, &[]));
        request.set_header("Content-Type", "application/json");
        request.set_header("Accept", "application/json");
        request.body = Some(body);
        self.transport.send(request).await
    }
}
