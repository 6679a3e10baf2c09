//! Error types for the ERP client

use thiserror::Error;

/// Error returned when the API answers with a non-success status.
///
/// `message` is the response body exactly as the server sent it, so it can be
/// shown to the user verbatim.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiStatusError {
    pub endpoint: String,
    pub status: u16,
    pub message: String,
}

impl ApiStatusError {
    /// Whether the server rejected the credential itself
    pub fn is_auth_failure(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Whether the failure is on the server side and may go away on retry
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Error thrown when a protected route is opened by a role that may not see it
#[derive(Debug, Error)]
#[error("Route '{path}' is not available for role '{role}'. Available routes: {}", allowed_routes.join(", "))]
pub struct RouteForbiddenError {
    pub path: String,
    pub role: String,
    pub allowed_routes: Vec<String>,
}

/// Error thrown when a session token cannot be decoded
#[derive(Debug, Error)]
#[error("Invalid session token: {reason}")]
pub struct InvalidTokenError {
    pub reason: String,
}

impl InvalidTokenError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// General ERP client error type
#[derive(Debug, Error)]
pub enum ErpError {
    #[error(transparent)]
    ApiStatus(#[from] ApiStatusError),

    #[error(transparent)]
    RouteForbidden(#[from] RouteForbiddenError),

    #[error(transparent)]
    InvalidToken(#[from] InvalidTokenError),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response from '{endpoint}': {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

impl ErpError {
    /// True when the error proves the credential is no longer accepted
    pub fn is_credential_rejection(&self) -> bool {
        match self {
            ErpError::ApiStatus(e) => e.is_auth_failure(),
            ErpError::InvalidToken(_) | ErpError::NotAuthenticated => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ErpError>;
