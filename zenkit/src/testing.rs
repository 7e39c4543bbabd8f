//! In-memory [`Transport`] for exercising the client without a network.

use crate::api::{Api, Response, Transport};
use crate::error::ZenkitError;
use http::Method;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// One request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    response: Response,
}

/// Serves canned responses by exact `(method, path)` and records every call.
/// Unrouted requests fail with a 404 `Status` error, non-2xx routes fail like the real transport does.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<Call>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// A fresh mock together with an [`Api`] routed through it.
    pub fn pair() -> (Arc<Self>, Api) {
        let mock = Arc::new(MockTransport::default());
        let api = Api::new(Arc::clone(&mock) as Arc<dyn Transport>);
        (mock, api)
    }

    /// Registers (or replaces) the reply for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, data: Value) {
        let mut routes = lock(&self.routes);
        routes.retain(|r| !(r.method == method && r.path == path));
        routes.push(Route { method, path: path.to_string(), response: Response::new(status, data) });
    }

    pub fn ok(&self, method: Method, path: &str, data: Value) {
        self.respond(method, path, 200, data)
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn calls_with(&self, method: &Method) -> Vec<Call> {
        lock(&self.calls).iter().filter(|c| &c.method == method).cloned().collect()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response, ZenkitError> {
        lock(&self.calls).push(Call { method: method.clone(), path: path.to_string(), body });
        let found = lock(&self.routes)
            .iter()
            .find(|r| r.method == method && r.path == path)
            .map(|r| r.response.clone());
        match found {
            Some(response) if response.is_success() => Ok(response),
            Some(response) => Err(ZenkitError::Status {
                method,
                url: path.to_string(),
                status: response.status,
                body: response.data.to_string(),
            }),
            None => Err(ZenkitError::Status { method, url: path.to_string(), status: 404, body: String::new() }),
        }
    }
}
