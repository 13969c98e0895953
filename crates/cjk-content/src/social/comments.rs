use cjk_auth::{Clock, HttpTransport, RequestInit, TokenStore};
use cjk_core::errors::{AuthError, RequestError};
use cjk_core::models::{ContentTarget, ListResponse, Member, SocialComment};
use serde_json::{json, Value};

use crate::api::ContentApi;

const COMMENTS: &str = "/api/social/comments/";

fn comment_path(id: i64) -> String {
    format!("{COMMENTS}{id}/")
}

impl<T, S, C> ContentApi<'_, T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Comments on `target`, in server order.
    pub async fn comments(&self, target: &ContentTarget) -> Result<Vec<SocialComment>, RequestError> {
        let mut init = RequestInit::get();
        init.query = target.query();
        self.client
            .request::<ListResponse<SocialComment>>(COMMENTS, init)
            .await
            .map(ListResponse::into_vec)
    }

    /// Post a comment as `author`, or as the signed-in member when `author`
    /// is `None`.
    pub async fn create_comment(
        &self,
        target: &ContentTarget,
        text: &str,
        author: Option<i64>,
    ) -> Result<SocialComment, AuthError> {
        let author = match author {
            Some(id) => id,
            None => self.current_member_id().await?,
        };

        let mut body = target.body();
        body.insert("text".into(), text.into());
        body.insert("user".into(), author.into());

        let comment = self
            .client
            .request(COMMENTS, RequestInit::post().json(Value::Object(body)))
            .await?;
        Ok(comment)
    }

    pub async fn update_comment(&self, id: i64, text: &str) -> Result<SocialComment, RequestError> {
        self.client
            .request(
                &comment_path(id),
                RequestInit::put().json(json!({ "text": text })),
            )
            .await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .execute(&comment_path(id), RequestInit::delete())
            .await
            .map(drop)
    }

    async fn current_member_id(&self) -> Result<i64, AuthError> {
        if self.client.credentials().is_none() {
            return Err(AuthError::MissingCredentials);
        }
        let me_path = self.client.auth_config().me_path.clone();
        let member: Member = self.client.request(&me_path, RequestInit::get()).await?;
        Ok(member.id)
    }
}
