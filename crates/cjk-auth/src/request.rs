//! Authorized request layer.
//!
//! Every protected call goes through [`AuthClient::execute`]: the stored access
//! token is attached, and a 401 on the first attempt triggers one refresh and
//! one retry. A second 401, or a refresh that yields nothing, surfaces as
//! [`RequestError::Unauthorized`].

use cjk_core::errors::RequestError;
use cjk_observability::events;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::AuthClient;
use crate::clock::Clock;
use crate::store::TokenStore;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

const UNAUTHORIZED: u16 = 401;
const NO_CONTENT: u16 = 204;

/// Options for one logical request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInit {
    pub method: Method,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestInit {
    fn default() -> Self {
        Self::new(Method::Get)
    }
}

impl RequestInit {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    pub fn put() -> Self {
        Self::new(Method::Put)
    }

    pub fn patch() -> Self {
        Self::new(Method::Patch)
    }

    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach any serializable value as the JSON body.
    pub fn json_body<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, RequestError> {
        let value = serde_json::to_value(body).map_err(|e| RequestError::Parse {
            reason: format!("failed to encode request body: {e}"),
        })?;
        Ok(self.json(value))
    }

    /// Add a query parameter. Empty values are dropped when the URL is built.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when `value` is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl<T, S, C> AuthClient<T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Send an authorized request and decode the JSON response.
    ///
    /// An empty success body decodes as the first of `{}`, `null` or `[]`
    /// that `R` accepts; otherwise it is a [`RequestError::Parse`].
    pub async fn request<R: DeserializeOwned>(
        &self,
        path: &str,
        init: RequestInit,
    ) -> Result<R, RequestError> {
        let body = self.execute(path, init).await?;
        if body.trim().is_empty() {
            return decode_empty();
        }
        serde_json::from_str(&body).map_err(|e| RequestError::Parse {
            reason: e.to_string(),
        })
    }

    /// Like [`request`](Self::request), but an empty or unparseable success
    /// body yields `fallback`. Status and authorization errors still propagate.
    pub async fn request_or<R: DeserializeOwned>(
        &self,
        path: &str,
        init: RequestInit,
        fallback: R,
    ) -> Result<R, RequestError> {
        let body = self.execute(path, init).await?;
        if body.trim().is_empty() {
            return Ok(fallback);
        }
        match serde_json::from_str(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "response body did not parse, using fallback");
                Ok(fallback)
            }
        }
    }

    /// Send an authorized request and return the raw success body.
    /// A 204 yields an empty string.
    pub async fn execute(&self, path: &str, init: RequestInit) -> Result<String, RequestError> {
        let url = self.url(path, &init.query);
        let body = init.body.as_ref().map(Value::to_string);
        let stored = self.store.get().map(|pair| pair.access);

        let first = self
            .send_once(&init, &url, body.clone(), stored.as_deref())
            .await?;

        let response = if first.status == UNAUTHORIZED {
            events::request_unauthorized(path, false);
            let Some(renewed) = self.refresh_after_rejection(stored.as_deref()).await else {
                return Err(RequestError::Unauthorized {
                    status: UNAUTHORIZED,
                });
            };

            let retried = self
                .send_once(&init, &url, body, Some(&renewed.access))
                .await?;
            if retried.status == UNAUTHORIZED {
                events::request_unauthorized(path, true);
                return Err(RequestError::Unauthorized {
                    status: UNAUTHORIZED,
                });
            }
            retried
        } else {
            first
        };

        if !response.is_success() {
            return Err(RequestError::Status {
                status: response.status,
                body: response.body,
            });
        }
        if response.status == NO_CONTENT {
            return Ok(String::new());
        }
        Ok(response.body)
    }

    async fn send_once(
        &self,
        init: &RequestInit,
        url: &str,
        body: Option<String>,
        access: Option<&str>,
    ) -> Result<HttpResponse, RequestError> {
        let mut request = HttpRequest::new(init.method, url);
        request.set_header("Accept", "application/json");
        if body.is_some() {
            request.set_header("Content-Type", "application/json");
        }
        for (name, value) in &init.headers {
            request.set_header(name, value.clone());
        }
        if let Some(access) = access.filter(|a| !a.is_empty()) {
            request.set_header("Authorization", format!("Bearer {access}"));
        }
        request.body = body;

        tracing::debug!(method = %init.method, url = %url, authorized = access.is_some(), "sending request");
        self.transport.send(request).await
    }
}

fn decode_empty<R: DeserializeOwned>() -> Result<R, RequestError> {
    serde_json::from_str("{}")
        .or_else(|_| serde_json::from_str("null"))
        .or_else(|_| serde_json::from_str("[]"))
        .map_err(|_| RequestError::Parse {
            reason: "empty response body".into(),
        })
}
