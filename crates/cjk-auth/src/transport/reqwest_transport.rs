use std::time::Duration;

use cjk_core::config::ApiConfig;
use cjk_core::errors::RequestError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::{HttpRequest, HttpResponse, HttpTransport, Method};

/// Transport backed by a pooled `reqwest` client. Never retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeout and gzip decoding.
    pub fn new(config: &ApiConfig) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| RequestError::Transport {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, RequestError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequestError::Transport {
            reason: format!("invalid header name {name}: {e}"),
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| RequestError::Transport {
            reason: format!("invalid header value for {name}: {e}"),
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .headers(header_map(&request.headers)?);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, url = %request.url, error = %e, "request failed before a response");
            RequestError::Transport {
                reason: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| RequestError::Transport {
            reason: format!("failed to read response body: {e}"),
        })?;

        Ok(HttpResponse { status, body })
    }
}
