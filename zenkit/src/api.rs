use crate::error::ZenkitError;
use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Decoded reply of a single remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub data: Value,
}

impl Response {
    pub fn new(status: u16, data: Value) -> Self {
        Response { status, data }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn expect_status(self, code: u16) -> Result<Self, ZenkitError> {
        if self.status != code {
            crate::error!("Return code '{}' is not '{}'.", self.status, code);
            return Err(ZenkitError::UnexpectedStatus { expected: code, actual: self.status });
        }
        Ok(self)
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, ZenkitError> {
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Carries requests to the remote API. Implementations must report network failures and non-2xx replies as errors.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response, ZenkitError>;
}

/// Shared handle every remote-facing type talks through.
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Api")
    }
}

impl Api {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Api { transport }
    }

    pub async fn get(&self, path: &str) -> Result<Response, ZenkitError> {
        self.transport.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Response, ZenkitError> {
        self.transport.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Response, ZenkitError> {
        self.transport.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ZenkitError> {
        self.transport.request(Method::DELETE, path, None).await
    }
}
