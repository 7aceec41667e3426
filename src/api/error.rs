use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Build from an error status; `body` is searched for the server's `message`
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let msg = extract_message(body);

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(msg),
            StatusCode::FORBIDDEN => ApiError::Unauthorized(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    /// Classify a transport failure from reqwest
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::InvalidResponse(error.to_string())
        } else if error.is_builder() {
            // never left the process; callers fall back to their generic message
            tracing::warn!("Failed to build request: {}", error);
            ApiError::Unknown(String::new())
        } else {
            ApiError::Network(error.to_string())
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Message the server put in its error body, if any
    pub fn server_message(&self) -> Option<&str> {
        let msg = match self {
            ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::BadRequest(m)
            | ApiError::ServerError(m)
            | ApiError::Unknown(m) => m,
            ApiError::Network(_) | ApiError::InvalidResponse(_) => return None,
        };
        (!msg.is_empty()).then_some(msg.as_str())
    }
}

/// Pull `message` (string or list of strings) or `error` out of a JSON error body
fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };

    match value.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Array(messages)) => messages
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}
