use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use cjk_auth::{HttpRequest, HttpResponse, HttpTransport, Method};
use cjk_core::errors::RequestError;

/// Base URL every scripted client is configured with.
pub const BASE_URL: &str = "http://portal.test";

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, RequestError> + Send + Sync>;

enum Script {
    /// Responses served in order; the last one repeats.
    Queue(VecDeque<Result<HttpResponse, RequestError>>),
    Handler(Handler),
}

/// Transport answering from per-route scripts.
///
/// Routes are keyed by method and URL path (query excluded). Unscripted
/// routes answer 404. Every request is recorded, and each send yields to the
/// runtime once so concurrent callers interleave.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Script>>,
    log: Mutex<Vec<HttpRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Path component of an absolute URL, without the query string.
fn path_of(url: &str) -> String {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = after_scheme.find('/').map_or("/", |i| &after_scheme[i..]);
    path.split('?').next().unwrap_or(path).to_string()
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(method, path, Ok(HttpResponse::new(status, body)))
    }

    /// Queue a JSON response for `method path`.
    pub fn on_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.on(method, path, status, body.to_string())
    }

    /// Queue a transport failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, reason: &str) -> &Self {
        self.push(
            method,
            path,
            Err(RequestError::Transport {
                reason: reason.to_string(),
            }),
        )
    }

    /// Answer `method path` with a function of the request.
    pub fn route<F>(&self, method: Method, path: &str, handler: F) -> &Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, RequestError> + Send + Sync + 'static,
    {
        lock(&self.routes).insert((method, path.to_string()), Script::Handler(Box::new(handler)));
        self
    }

    fn push(&self, method: Method, path: &str, response: Result<HttpResponse, RequestError>) -> &Self {
        let mut routes = lock(&self.routes);
        let script = routes
            .entry((method, path.to_string()))
            .or_insert_with(|| Script::Queue(VecDeque::new()));
        match script {
            Script::Queue(queue) => queue.push_back(response),
            Script::Handler(_) => *script = Script::Queue(VecDeque::from([response])),
        }
        self
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.log).clone()
    }

    /// Requests sent to `method path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        lock(&self.log)
            .iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    pub fn total(&self) -> usize {
        lock(&self.log).len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.log).last().cloned()
    }

    fn answer(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let key = (request.method, path_of(&request.url));
        let mut routes = lock(&self.routes);
        match routes.get_mut(&key) {
            Some(Script::Handler(handler)) => handler(request),
            Some(Script::Queue(queue)) if queue.len() > 1 => {
                queue.pop_front().unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
            }
            Some(Script::Queue(queue)) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, ""))),
            None => Ok(HttpResponse::new(404, r#"{"detail":"Not found."}"#)),
        }
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        lock(&self.log).push(request.clone());
        tokio::task::yield_now().await;
        self.answer(&request)
    }
}
