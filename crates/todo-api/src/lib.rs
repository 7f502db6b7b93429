//! Todo API
//!
//! Client side of the todo REST service: wire models, the bearer-token
//! interceptor, a pluggable transport and a persistent token store seam.
//! Nothing in here touches the DOM, so it builds and tests on any target.

mod client;
mod error;
mod models;
mod token;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use models::{Credentials, LoginResponse, NewTodo, TodoItem, TodoPatch};
pub use token::{MemoryTokenStore, SessionMirror, TokenStore};
pub use transport::{join_url, ApiRequest, ApiResponse, HttpTransport, Method, Transport};
