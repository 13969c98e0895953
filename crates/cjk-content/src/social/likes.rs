use cjk_auth::{Clock, HttpTransport, RequestInit, TokenStore};
use cjk_core::errors::RequestError;
use cjk_core::models::{ContentTarget, LikeResponse};
use serde_json::Value;

use crate::api::ContentApi;

const LIKE_TOGGLE: &str = "/api/social/likes/toggle/";

impl<T, S, C> ContentApi<'_, T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Like or unlike `target` for the signed-in member.
    pub async fn toggle_like(&self, target: &ContentTarget) -> Result<LikeResponse, RequestError> {
        self.client
            .request(
                LIKE_TOGGLE,
                RequestInit::post().json(Value::Object(target.body())),
            )
            .await
    }
}
