//! Wire Models
//!
//! Data structures matching the todo service's JSON bodies.

use serde::{Deserialize, Serialize};

/// Login form contents, only alive while the form is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body of a successful `POST /users/login`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// A todo as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    #[serde(rename = "userId", default)]
    pub user_id: u64,
    pub body: String,
    pub complete: bool,
}

/// Body of `POST /todos`
#[derive(Debug, Clone, Serialize)]
pub struct NewTodo<'a> {
    pub body: &'a str,
    pub complete: bool,
}

impl<'a> NewTodo<'a> {
    /// New todos always start incomplete
    pub fn new(body: &'a str) -> Self {
        Self { body, complete: false }
    }
}

/// Body of `PATCH /todos/:id`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TodoPatch {
    pub complete: bool,
}
