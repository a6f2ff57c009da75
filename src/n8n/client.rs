//! n8n REST client with ordered endpoint fallback.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::CredflowConfig;
use crate::error::{CredflowError, Result};

use super::credential::{CredentialPayload, CredentialType};
use super::endpoints::{self, Endpoint, API_KEY_HEADER};

/// Response body as returned by n8n: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{value}"),
            },
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// The endpoint that accepted a request and what it answered.
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    pub endpoint: String,
    pub status: u16,
    pub body: ResponseBody,
}

/// Why a single candidate endpoint was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The endpoint answered outside its success set; body kept verbatim.
    Status { status: u16, body: String },
    /// The request never produced a response.
    Transport(String),
}

/// One failed attempt during a fallback sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    pub endpoint: String,
    pub reason: FailureReason,
}

impl EndpointFailure {
    pub fn is_transport(&self) -> bool {
        matches!(self.reason, FailureReason::Transport(_))
    }
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FailureReason::Status { status, body } => {
                write!(f, "{} returned status {status}: {body}", self.endpoint)
            }
            FailureReason::Transport(message) => {
                write!(f, "request to {} failed: {message}", self.endpoint)
            }
        }
    }
}

/// Client for the n8n credentials API.
///
/// Every call builds its own request; nothing is cached between calls.
///
/// # Example
/// ```no_run
/// use credflow::n8n::{ImapCredential, N8nClient};
///
/// # async fn example() -> credflow::error::Result<()> {
/// let client = N8nClient::new("http://localhost:5678", "n8n-api-key");
/// let credential = ImapCredential::builder()
///     .user("user@example.com")
///     .password("app-password")
///     .build();
/// let created = client.create_credential(&credential.to_payload()).await?;
/// println!("created at {}: {}", created.endpoint, created.body);
/// # Ok(())
/// # }
/// ```
pub struct N8nClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    publish_timeout: Option<Duration>,
    schema_timeout: Option<Duration>,
}

impl fmt::Debug for N8nClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("N8nClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"..")
            .field("publish_timeout", &self.publish_timeout)
            .field("schema_timeout", &self.schema_timeout)
            .finish()
    }
}

impl N8nClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            publish_timeout: None,
            schema_timeout: None,
        }
    }

    pub fn from_config(config: &CredflowConfig) -> Self {
        Self::new(config.n8n_base_url(), config.n8n_api_key())
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = Some(timeout);
        self
    }

    pub fn with_schema_timeout(mut self, timeout: Duration) -> Self {
        self.schema_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether both the base URL and the API key are set.
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    pub fn credential_endpoints(&self) -> Vec<Endpoint> {
        endpoints::credential_endpoints(&self.base_url)
    }

    pub fn hosted_oauth_url(&self, credential_type: &CredentialType) -> Result<String> {
        endpoints::hosted_oauth_url(&self.base_url, credential_type, &self.api_key)
    }

    /// Create a credential using the default candidate endpoints.
    pub async fn create_credential(&self, payload: &CredentialPayload) -> Result<EndpointResponse> {
        self.publish(payload, &self.credential_endpoints()).await
    }

    /// POST `payload` to each candidate in order until one accepts it.
    ///
    /// Returns [`CredflowError::PublishExhausted`] listing every attempt when
    /// none does.
    pub async fn publish(
        &self,
        payload: &CredentialPayload,
        candidates: &[Endpoint],
    ) -> Result<EndpointResponse> {
        debug!(
            name = payload.name(),
            credential_type = %payload.credential_type(),
            "publishing credential"
        );
        self.first_success(candidates, self.publish_timeout, |endpoint| {
            self.client.post(&endpoint.url).json(payload)
        })
        .await
        .map_err(CredflowError::PublishExhausted)
    }

    /// Fetch the n8n schema for a credential type.
    pub async fn fetch_schema(&self, credential_type: &CredentialType) -> Result<EndpointResponse> {
        let candidates = endpoints::schema_endpoints(&self.base_url, credential_type);
        self.first_success(&candidates, self.schema_timeout, |endpoint| {
            self.client.get(&endpoint.url)
        })
        .await
        .map_err(CredflowError::SchemaUnavailable)
    }

    async fn first_success<F>(
        &self,
        candidates: &[Endpoint],
        timeout: Option<Duration>,
        build: F,
    ) -> std::result::Result<EndpointResponse, Vec<EndpointFailure>>
    where
        F: Fn(&Endpoint) -> reqwest::RequestBuilder,
    {
        let mut failures = Vec::with_capacity(candidates.len());

        for endpoint in candidates {
            let mut request = build(endpoint).header(API_KEY_HEADER, &self.api_key);
            if let Some(timeout) = timeout {
                request = request.timeout(timeout);
            }

            let outcome = match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    response.text().await.map(|body| (status, body))
                }
                Err(err) => Err(err),
            };

            let failure = match outcome {
                Ok((status, body)) if endpoint.accepts(status) => {
                    info!(endpoint = %endpoint, status, "n8n accepted request");
                    return Ok(EndpointResponse {
                        endpoint: endpoint.url.clone(),
                        status,
                        body: ResponseBody::parse(body),
                    });
                }
                Ok((status, body)) => EndpointFailure {
                    endpoint: endpoint.url.clone(),
                    reason: FailureReason::Status { status, body },
                },
                Err(err) => EndpointFailure {
                    endpoint: endpoint.url.clone(),
                    reason: FailureReason::Transport(err.to_string()),
                },
            };
            warn!(endpoint = %endpoint, failure = %failure, "n8n endpoint rejected request");
            failures.push(failure);
        }

        Err(failures)
    }
}
