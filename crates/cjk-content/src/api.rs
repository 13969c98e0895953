//! Entry point for content operations.

use cjk_auth::{AuthClient, Clock, HttpTransport, RequestInit, SystemClock, TokenStore};
use cjk_core::errors::RequestError;
use cjk_core::models::ListResponse;
use serde::de::DeserializeOwned;

/// Content and social operations bound to one client.
pub struct ContentApi<'a, T, S, C = SystemClock> {
    pub(crate) client: &'a AuthClient<T, S, C>,
}

impl<'a, T, S, C> ContentApi<'a, T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    pub fn new(client: &'a AuthClient<T, S, C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &'a AuthClient<T, S, C> {
        self.client
    }

    /// Read a list endpoint in either shape. An empty or unreadable body
    /// yields an empty list; status errors propagate.
    pub(crate) async fn list<R: DeserializeOwned>(
        &self,
        path: &str,
        init: RequestInit,
    ) -> Result<Vec<R>, RequestError> {
        self.client
            .request_or(path, init, ListResponse::default())
            .await
            .map(ListResponse::into_vec)
    }
}

/// Filters for the blog post list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    /// Category id or slug.
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub activity_type: Option<String>,
    pub is_published: Option<bool>,
}

impl BlogFilter {
    pub(crate) fn apply(&self, init: RequestInit) -> RequestInit {
        init.query_opt("category", self.category.as_deref())
            .query_opt("is_published", self.is_published)
    }
}

impl NewsFilter {
    pub(crate) fn apply(&self, init: RequestInit) -> RequestInit {
        init.query_opt("is_published", self.is_published)
    }
}

impl ActivityFilter {
    pub(crate) fn apply(&self, init: RequestInit) -> RequestInit {
        init.query_opt("activity_type", self.activity_type.as_deref())
            .query_opt("is_published", self.is_published)
    }
}
