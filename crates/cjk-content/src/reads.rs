//! Public content reads.

use cjk_auth::{Clock, HttpTransport, RequestInit, TokenStore};
use cjk_core::errors::RequestError;
use cjk_core::models::{Activity, BlogCategory, BlogPost, ContentKind, NewsItem};

use crate::api::{ActivityFilter, BlogFilter, ContentApi, NewsFilter};

const BLOG_CATEGORIES: &str = "/api/blog/categories/";

impl<T, S, C> ContentApi<'_, T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    pub async fn blog_posts(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, RequestError> {
        self.list(ContentKind::BlogPost.collection_path(), filter.apply(RequestInit::get()))
            .await
    }

    pub async fn blog_post(&self, id: i64) -> Result<BlogPost, RequestError> {
        self.client
            .request(&ContentKind::BlogPost.item_path(id), RequestInit::get())
            .await
    }

    pub async fn blog_categories(&self) -> Result<Vec<BlogCategory>, RequestError> {
        self.list(BLOG_CATEGORIES, RequestInit::get()).await
    }

    pub async fn news(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, RequestError> {
        self.list(ContentKind::News.collection_path(), filter.apply(RequestInit::get()))
            .await
    }

    pub async fn news_item(&self, id: i64) -> Result<NewsItem, RequestError> {
        self.client
            .request(&ContentKind::News.item_path(id), RequestInit::get())
            .await
    }

    pub async fn activities(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, RequestError> {
        self.list(ContentKind::Activity.collection_path(), filter.apply(RequestInit::get()))
            .await
    }

    pub async fn activity(&self, id: i64) -> Result<Activity, RequestError> {
        self.client
            .request(&ContentKind::Activity.item_path(id), RequestInit::get())
            .await
    }
}
