//! Test Support
//!
//! [`FakeServer`] answers the five todo endpoints from memory and records
//! every request it sees, so clients can be exercised without a network.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};

use crate::error::{ClientError, ClientResult};
use crate::models::TodoItem;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

struct User {
    id: u64,
    password: String,
    token: String,
}

#[derive(Default)]
struct State {
    users: HashMap<String, User>,
    todos: Vec<TodoItem>,
    next_todo_id: u64,
    requests: Vec<ApiRequest>,
    canned: Option<ApiResponse>,
    overrides: Vec<(Method, String, ApiResponse)>,
}

/// In-memory stand-in for the todo service
#[derive(Default)]
pub struct FakeServer {
    state: RefCell<State>,
    offline: Cell<bool>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user whose login yields `token`
    pub fn add_user(&self, username: &str, password: &str, token: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.users.len() as u64 + 1;
        state.users.insert(
            username.to_string(),
            User {
                id,
                password: password.to_string(),
                token: token.to_string(),
            },
        );
        id
    }

    /// Store a todo directly, bypassing the API
    pub fn seed_todo(&self, user_id: u64, body: &str, complete: bool) -> TodoItem {
        let mut state = self.state.borrow_mut();
        state.next_todo_id += 1;
        let item = TodoItem {
            id: state.next_todo_id,
            user_id,
            body: body.to_string(),
            complete,
        };
        state.todos.push(item.clone());
        item
    }

    /// Fail every subsequent request at the transport level
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Answer the next request with this status and body instead of routing it
    pub fn respond_next(&self, status: u16, body: &str) {
        self.state.borrow_mut().canned = Some(ApiResponse {
            status,
            body: body.to_string(),
        });
    }

    /// Answer the next request matching `method` and `path` with this status
    /// and body; other requests are routed normally
    pub fn respond_once(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state.borrow_mut().overrides.push((
            method,
            path.to_string(),
            ApiResponse {
                status,
                body: body.to_string(),
            },
        ));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.borrow().requests.last().cloned()
    }

    pub fn todos(&self) -> Vec<TodoItem> {
        self.state.borrow().todos.clone()
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.borrow_mut();

        if request.method == Method::Post && request.path == "/users/login" {
            return login(&state, request.body.as_ref());
        }

        let Some(user_id) = authenticated_user(&state, request) else {
            return reply(401, json!({ "message": "unauthorized" }));
        };

        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        match (request.method, segments.as_slice()) {
            (Method::Get, ["todos"]) => {
                let mine: Vec<&TodoItem> =
                    state.todos.iter().filter(|t| t.user_id == user_id).collect();
                reply(200, json!(mine))
            }
            (Method::Post, ["todos"]) => {
                let Some(body) = request.body.as_ref().and_then(|b| b.get("body")).and_then(Value::as_str) else {
                    return reply(400, json!({ "message": "body is required" }));
                };
                let complete = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get("complete"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                state.next_todo_id += 1;
                let item = TodoItem {
                    id: state.next_todo_id,
                    user_id,
                    body: body.to_string(),
                    complete,
                };
                state.todos.push(item.clone());
                reply(201, json!(item))
            }
            (Method::Patch, ["todos", id]) => {
                let complete = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get("complete"))
                    .and_then(Value::as_bool);
                match find_mut(&mut state.todos, id, user_id) {
                    Some(item) => {
                        if let Some(complete) = complete {
                            item.complete = complete;
                        }
                        reply(200, json!(item))
                    }
                    None => reply(404, json!({ "message": "todo not found" })),
                }
            }
            (Method::Delete, ["todos", id]) => {
                let before = state.todos.len();
                let id = id.parse::<u64>().ok();
                state
                    .todos
                    .retain(|t| Some(t.id) != id || t.user_id != user_id);
                if state.todos.len() == before {
                    reply(404, json!({ "message": "todo not found" }))
                } else {
                    reply(200, json!({}))
                }
            }
            _ => reply(404, json!({ "message": "no such route" })),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeServer {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.state.borrow_mut().requests.push(request.clone());

        if self.offline.get() {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        if let Some(canned) = self.state.borrow_mut().canned.take() {
            return Ok(canned);
        }
        if let Some(response) = take_override(&mut self.state.borrow_mut(), &request) {
            return Ok(response);
        }
        Ok(self.route(&request))
    }
}

fn login(state: &State, body: Option<&Value>) -> ApiResponse {
    let field = |name: &str| body.and_then(|b| b.get(name)).and_then(Value::as_str);
    match (field("username"), field("password")) {
        (Some(username), Some(password)) => match state.users.get(username) {
            Some(user) if user.password == password => {
                reply(200, json!({ "token": user.token, "id": user.id }))
            }
            _ => reply(401, json!({ "message": "invalid credentials" })),
        },
        _ => reply(400, json!({ "message": "username and password are required" })),
    }
}

fn take_override(state: &mut State, request: &ApiRequest) -> Option<ApiResponse> {
    let index = state
        .overrides
        .iter()
        .position(|(method, path, _)| *method == request.method && *path == request.path)?;
    Some(state.overrides.remove(index).2)
}

fn authenticated_user(state: &State, request: &ApiRequest) -> Option<u64> {
    let header = request.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    state
        .users
        .values()
        .find(|user| user.token == token)
        .map(|user| user.id)
}

fn find_mut<'a>(todos: &'a mut [TodoItem], id: &str, user_id: u64) -> Option<&'a mut TodoItem> {
    let id = id.parse::<u64>().ok()?;
    todos
        .iter_mut()
        .find(|t| t.id == id && t.user_id == user_id)
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}
