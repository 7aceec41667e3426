use thiserror::Error;

use crate::api::ApiError;

/// Closed classification of everything a store operation can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response reached the client
    Connectivity,
    /// The server answered with an error status or an unreadable body
    Application,
    NotFound,
    /// A local precondition rejected the operation before any request was made
    Validation,
}

/// Store-level error: a kind to branch on plus the message shown to the operator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct StoreError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn connectivity(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connectivity, detail)
    }

    pub fn application(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Application, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, detail)
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, detail)
    }

    /// Normalize a client error, preferring the server's own message over `generic`
    pub fn from_api(error: ApiError, generic: &str) -> Self {
        let kind = if error.is_connectivity() {
            ErrorKind::Connectivity
        } else if matches!(error, ApiError::NotFound(_)) {
            ErrorKind::NotFound
        } else {
            ErrorKind::Application
        };

        let detail = match error.server_message() {
            Some(message) if kind != ErrorKind::Connectivity => message.to_string(),
            _ => generic.to_string(),
        };

        Self { kind, detail }
    }

    pub fn is_connectivity(&self) -> bool {
        self.kind == ErrorKind::Connectivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins_over_generic() {
        let error = StoreError::from_api(
            ApiError::BadRequest("email must be an email".to_string()),
            "Failed to create user",
        );
        assert_eq!(error.kind, ErrorKind::Application);
        assert_eq!(error.to_string(), "email must be an email");
    }

    #[test]
    fn test_generic_message_when_server_is_silent() {
        let error = StoreError::from_api(
            ApiError::ServerError(String::new()),
            "Failed to fetch users",
        );
        assert_eq!(error.kind, ErrorKind::Application);
        assert_eq!(error.detail, "Failed to fetch users");
    }

    #[test]
    fn test_network_failure_is_connectivity() {
        let error = StoreError::from_api(
            ApiError::Network("Network Error".to_string()),
            "Failed to fetch workouts",
        );
        assert!(error.is_connectivity());
        assert_eq!(error.detail, "Failed to fetch workouts");
    }

    #[test]
    fn test_remote_not_found_keeps_kind() {
        let error = StoreError::from_api(ApiError::NotFound(String::new()), "Failed to fetch group");
        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.detail, "Failed to fetch group");
    }
}
