//! Error types for credflow.

use thiserror::Error;

use crate::n8n::EndpointFailure;

/// Broad error category, used to pick a user-facing hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Required configuration absent or invalid input supplied locally.
    Configuration,
    /// Network, DNS, TLS, or IMAP protocol failure.
    Transport,
    /// A remote endpoint answered with a non-success status.
    Http,
    /// OAuth callback or token exchange rejected.
    Authentication,
    Serialization,
}

/// Primary error type for all credflow operations.
#[derive(Error, Debug)]
pub enum CredflowError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("IMAP connection failed: {0}")]
    Imap(String),

    #[error("All credential endpoints failed: {}", join_failures(.0))]
    PublishExhausted(Vec<EndpointFailure>),

    #[error("Could not fetch credential schema: {}", join_failures(.0))]
    SchemaUnavailable(Vec<EndpointFailure>),
}

impl CredflowError {
    /// Create an API error from a status code and verbatim body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::InvalidArgument(_) => ErrorCategory::Configuration,
            Self::Network(_) | Self::Io(_) | Self::Imap(_) => ErrorCategory::Transport,
            Self::Api { .. } => ErrorCategory::Http,
            Self::PublishExhausted(failures) | Self::SchemaUnavailable(failures) => {
                if !failures.is_empty() && failures.iter().all(EndpointFailure::is_transport) {
                    ErrorCategory::Transport
                } else {
                    ErrorCategory::Http
                }
            }
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Serialization(_) => ErrorCategory::Serialization,
        }
    }

    /// Endpoints attempted before giving up, if this is an exhaustion error.
    pub fn failed_endpoints(&self) -> &[EndpointFailure] {
        match self {
            Self::PublishExhausted(failures) | Self::SchemaUnavailable(failures) => failures,
            _ => &[],
        }
    }
}

fn join_failures(failures: &[EndpointFailure]) -> String {
    if failures.is_empty() {
        return "no endpoints were attempted".to_string();
    }
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CredflowError>;
