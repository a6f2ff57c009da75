use thiserror::Error;

use crate::error::CredflowError;

/// Failures of the OAuth authorization-code flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization denied: {0}")]
    AccessDenied(String),
    #[error("No authorization code in callback")]
    MissingCode,
    #[error("OAuth state mismatch: expected {expected}, got {actual}")]
    StateMismatch { expected: String, actual: String },
    #[error("Token endpoint returned status {status}: {body}")]
    TokenEndpoint { status: u16, body: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}

impl From<AuthError> for CredflowError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenEndpoint { status, body } => CredflowError::api(status, body),
            AuthError::Network(source) => CredflowError::Network(source),
            AuthError::InvalidUrl(message) => CredflowError::Configuration(message),
            other => CredflowError::Authentication(other.to_string()),
        }
    }
}
