use crate::api::{Api, Response, Transport};
use crate::config::ZenkitConfig;
use crate::error::ZenkitError;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::Method;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "Zenkit-API-Key";

#[derive(Clone)]
pub struct HttpTransport {
    http_client: Arc<Client>,
    config: ZenkitConfig,
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response, ZenkitError> {
        let url = self.config.url(path);
        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(ZenkitError::Status { method, url, status, body: text });
        }
        Ok(Response::new(status, Self::parse_body(&text)?))
    }
}

impl HttpTransport {
    pub fn new(config: &ZenkitConfig) -> Result<Self, ZenkitError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&config.api_key)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(HttpTransport { http_client: Arc::new(http_client), config: config.clone() })
    }

    pub fn into_api(self) -> Api {
        Api::new(Arc::new(self))
    }

    fn parse_body(text: &str) -> Result<Value, ZenkitError> {
        if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(text)?)
        }
    }
}
