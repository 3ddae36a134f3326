//! Error types for the Odonto client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Odonto client.
///
/// Each variant maps to one category of the error taxonomy the views
/// react to: bad credentials, a stale token, a missing permission, an
/// unreachable backend, a rejected mutation, and so on.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum OdontoError {
    /// Credentials were rejected by the login endpoint
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend rejected the bearer token (HTTP 401 outside of login)
    #[error("Session is no longer valid")]
    Unauthorized,

    /// The signed-in role lacks the capability for the requested action
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Transport-level failure (DNS, connect, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response that has no more specific category
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The backend refused the mutation because of a referential constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backend (or the local cache) has no such record
    #[error("No {entity_type} with id '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Input rejected before it reached the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// A mutation is already in flight for this controller
    #[error("Another request is still in progress")]
    Busy,

    /// Operation not permitted in the current session state
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// Local storage failure
    #[error("Storage error: {message}")]
    Io { message: String },

    /// A payload or file could not be encoded or decoded
    #[error("Malformed {format}: {message}")]
    Serialization {
        format: String,
        message: String,
    },

    /// Unusable configuration file or environment
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A bug or an unexpected adapter failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OdontoError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Maps an HTTP status and response body to the matching category.
    ///
    /// `during_login` distinguishes bad credentials (401 on the login
    /// endpoint) from a stale token (401 anywhere else).
    pub fn from_status(status: u16, message: impl Into<String>, during_login: bool) -> Self {
        let message = message.into();
        match status {
            401 if during_login => Self::Authentication(message),
            401 => Self::Unauthorized,
            403 => Self::Forbidden(message),
            404 => Self::NotFound {
                entity_type: "resource",
                id: message,
            },
            409 => Self::Conflict(message),
            _ => Self::Backend { status, message },
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if the backend rejected the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Returns the message a view shows for this error.
    ///
    /// Every category the views distinguish gets its own wording, so a
    /// network outage never reads like a rejected delete.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication(_) => "Invalid email or password.".to_string(),
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            Self::Forbidden(_) => "You do not have permission to access this page.".to_string(),
            Self::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            Self::Backend { status, message } if message.trim().is_empty() => {
                format!("The server could not complete the request (status {}).", status)
            }
            Self::Backend { message, .. } => format!("The server rejected the request: {}", message),
            Self::Conflict(_) => {
                "This record is referenced by other records and cannot be removed.".to_string()
            }
            Self::NotFound { entity_type, .. } => format!("The requested {} was not found.", entity_type),
            Self::Validation(message) => message.clone(),
            Self::Busy => "Please wait for the current operation to finish.".to_string(),
            Self::InvalidState(message) => message.clone(),
            Self::Io { .. } | Self::Serialization { .. } | Self::Config(_) | Self::Internal(_) => {
                format!("Unexpected error: {}", self)
            }
        }
    }
}

impl From<std::io::Error> for OdontoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} ({:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for OdontoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for OdontoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for OdontoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for OdontoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            };
        }
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string(), false),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for OdontoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, OdontoError>`.
pub type Result<T> = std::result::Result<T, OdontoError>;
