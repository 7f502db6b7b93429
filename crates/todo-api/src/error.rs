//! Client Errors

use serde_json::Value;
use thiserror::Error;

/// Result alias for API operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong during one request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (offline, DNS, CORS, aborted)
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },
    /// A 2xx response whose body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The stored token contains bytes that cannot go into a header
    #[error("Stored token is not a valid header value")]
    InvalidToken,
}

impl ClientError {
    /// Build an `Api` error, preferring the server's `message` field when the body is JSON
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .or_else(|| json.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| status_reason(status).to_string());
        ClientError::Api { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}
