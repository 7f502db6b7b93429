//! API Client
//!
//! One method per endpoint of the todo service. Every request goes through
//! [`ApiClient::authorize`] before it reaches the transport.

use std::rc::Rc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::models::{Credentials, LoginResponse, NewTodo, TodoItem, TodoPatch};
use crate::token::TokenStore;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

const LOGIN_PATH: &str = "/users/login";
const TODOS_PATH: &str = "/todos";

/// Client for the todo REST API.
///
/// Cheap to clone; clones share the transport and the token store.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    tokens: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, tokens: Rc<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    // ========================
    // Endpoints
    // ========================

    /// `POST /users/login`
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        let request =
            ApiRequest::new(Method::Post, LOGIN_PATH).json(serde_json::to_value(credentials)?);
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// `GET /todos`, scoped to the token's user by the server
    pub async fn list_todos(&self) -> ClientResult<Vec<TodoItem>> {
        let response = self.execute(ApiRequest::new(Method::Get, TODOS_PATH)).await?;
        decode(&response)
    }

    /// `POST /todos`
    pub async fn create_todo(&self, body: &str) -> ClientResult<TodoItem> {
        let request =
            ApiRequest::new(Method::Post, TODOS_PATH).json(serde_json::to_value(NewTodo::new(body))?);
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// `DELETE /todos/:id`
    pub async fn delete_todo(&self, id: u64) -> ClientResult<()> {
        self.execute(ApiRequest::new(Method::Delete, todo_path(id))).await?;
        Ok(())
    }

    /// `PATCH /todos/:id`. The server echoes the item back; the body is not needed.
    pub async fn update_complete(&self, id: u64, complete: bool) -> ClientResult<()> {
        let request = ApiRequest::new(Method::Patch, todo_path(id))
            .json(serde_json::to_value(TodoPatch { complete })?);
        self.execute(request).await?;
        Ok(())
    }

    // ========================
    // Plumbing
    // ========================

    /// Request interceptor: attach the bearer token if one is stored.
    ///
    /// Only the `Authorization` entry is touched; other headers already on the
    /// request are preserved.
    pub fn authorize(&self, request: &mut ApiRequest) -> ClientResult<()> {
        if let Some(token) = self.tokens.get() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidToken)?;
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }

    async fn execute(&self, mut request: ApiRequest) -> ClientResult<ApiResponse> {
        self.authorize(&mut request)?;
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method.as_str(), path, e);
            e
        })?;

        if !response.is_success() {
            log::warn!("{} {} returned {}", method.as_str(), path, response.status);
            return Err(ClientError::from_status(response.status, &response.body));
        }
        Ok(response)
    }
}

fn todo_path(id: u64) -> String {
    format!("{}/{}", TODOS_PATH, id)
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ClientResult<T> {
    Ok(serde_json::from_str(&response.body)?)
}
