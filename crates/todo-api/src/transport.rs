//! HTTP Transport
//!
//! The seam between [`ApiClient`](crate::ApiClient) and the network. The
//! production transport is reqwest (fetch on wasm32); tests plug in
//! [`FakeServer`](crate::testing::FakeServer).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request relative to the API base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/todos/3`
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations report only transport failures as errors; mapping
/// non-2xx statuses is the client's job.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// Join a base URL and a request path, keeping any path prefix on the base
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// reqwest-backed transport against a fixed base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = join_url(&self.base_url, &request.path);
        log::debug!("{} {}", request.method.as_str(), url);

        let mut builder = self
            .client
            .request(request.method.into(), url.as_str())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(&body)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("{} {} -> {}", request.method.as_str(), url, status);

        Ok(ApiResponse { status, body })
    }
}
