//! Staff authoring: create, edit, publish and delete posts, news and
//! activities. The server enforces staff rights; a non-staff caller gets a
//! `RequestError::Status` with 403.

use cjk_auth::{Clock, HttpTransport, RequestInit, TokenStore};
use cjk_core::errors::RequestError;
use cjk_core::models::{Activity, BlogPost, ContentKind, NewsItem};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::api::ContentApi;

/// Editable fields shared by the three content kinds.
///
/// `text` is sent as `content` for posts and news and as `description` for
/// activities. Fields that do not apply to a kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDraft {
    pub title: String,
    pub text: String,
    pub category: Option<i64>,
    pub activity_type: Option<String>,
    pub date_activite: Option<String>,
    /// URL of an already uploaded image.
    pub image: Option<String>,
}

impl ContentDraft {
    /// JSON body for `kind`. New content also gets a slug derived from the
    /// title.
    pub fn to_body(&self, kind: ContentKind, with_slug: bool) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("title".into(), self.title.clone().into());
        if with_slug {
            body.insert("slug".into(), slugify(&self.title).into());
        }

        match kind {
            ContentKind::BlogPost => {
                body.insert("content".into(), self.text.clone().into());
                if let Some(category) = self.category {
                    body.insert("category".into(), category.into());
                }
            }
            ContentKind::News => {
                body.insert("content".into(), self.text.clone().into());
            }
            ContentKind::Activity => {
                body.insert("description".into(), self.text.clone().into());
                if let Some(activity_type) = &self.activity_type {
                    body.insert("activity_type".into(), activity_type.clone().into());
                }
                if let Some(date) = self.date_activite.as_deref().filter(|d| !d.is_empty()) {
                    body.insert("date_activite".into(), date.into());
                }
            }
        }

        if let Some(image) = &self.image {
            body.insert("image".into(), image.clone().into());
        }
        body
    }
}

/// Lowercase ASCII slug: runs of anything but `a-z0-9` become one `-`,
/// with no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

impl<T, S, C> ContentApi<'_, T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    pub async fn create_blog_post(&self, draft: &ContentDraft) -> Result<BlogPost, RequestError> {
        self.create(ContentKind::BlogPost, draft).await
    }

    pub async fn create_news(&self, draft: &ContentDraft) -> Result<NewsItem, RequestError> {
        self.create(ContentKind::News, draft).await
    }

    pub async fn create_activity(&self, draft: &ContentDraft) -> Result<Activity, RequestError> {
        self.create(ContentKind::Activity, draft).await
    }

    pub async fn update_blog_post(
        &self,
        id: i64,
        draft: &ContentDraft,
    ) -> Result<BlogPost, RequestError> {
        self.update(ContentKind::BlogPost, id, draft).await
    }

    pub async fn update_news(&self, id: i64, draft: &ContentDraft) -> Result<NewsItem, RequestError> {
        self.update(ContentKind::News, id, draft).await
    }

    pub async fn update_activity(
        &self,
        id: i64,
        draft: &ContentDraft,
    ) -> Result<Activity, RequestError> {
        self.update(ContentKind::Activity, id, draft).await
    }

    /// Toggle visibility with a partial update of `is_published`.
    pub async fn set_published(
        &self,
        kind: ContentKind,
        id: i64,
        published: bool,
    ) -> Result<(), RequestError> {
        self.client
            .execute(
                &kind.item_path(id),
                RequestInit::patch().json(json!({ "is_published": published })),
            )
            .await?;
        tracing::info!(?kind, id, published, "publication state changed");
        Ok(())
    }

    pub async fn delete(&self, kind: ContentKind, id: i64) -> Result<(), RequestError> {
        self.client
            .execute(&kind.item_path(id), RequestInit::delete())
            .await?;
        tracing::info!(?kind, id, "content deleted");
        Ok(())
    }

    pub async fn delete_blog_post(&self, id: i64) -> Result<(), RequestError> {
        self.delete(ContentKind::BlogPost, id).await
    }

    pub async fn delete_news(&self, id: i64) -> Result<(), RequestError> {
        self.delete(ContentKind::News, id).await
    }

    pub async fn delete_activity(&self, id: i64) -> Result<(), RequestError> {
        self.delete(ContentKind::Activity, id).await
    }

    async fn create<R: DeserializeOwned>(
        &self,
        kind: ContentKind,
        draft: &ContentDraft,
    ) -> Result<R, RequestError> {
        let init = RequestInit::post().json(Value::Object(draft.to_body(kind, true)));
        self.client.request(kind.collection_path(), init).await
    }

    async fn update<R: DeserializeOwned>(
        &self,
        kind: ContentKind,
        id: i64,
        draft: &ContentDraft,
    ) -> Result<R, RequestError> {
        let init = RequestInit::patch().json(Value::Object(draft.to_body(kind, false)));
        self.client.request(&kind.item_path(id), init).await
    }
}
