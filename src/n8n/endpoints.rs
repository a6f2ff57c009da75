//! Candidate n8n endpoints, tried in order.
//!
//! n8n exposes credentials both under the public versioned API and the
//! internal `/rest` API depending on release; both are tried.

use std::fmt;

use reqwest::Url;

use crate::error::{CredflowError, Result};

use super::credential::CredentialType;

pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

pub const CREATE_SUCCESS: &[u16] = &[200, 201];
pub const SCHEMA_SUCCESS: &[u16] = &[200];

const CREDENTIAL_PATHS: [&str; 2] = ["api/v1/credentials", "rest/credentials"];

/// One candidate URL and the statuses that count as success for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub success: Vec<u16>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, success: &[u16]) -> Self {
        Self {
            url: url.into(),
            success: success.to_vec(),
        }
    }

    pub fn accepts(&self, status: u16) -> bool {
        self.success.contains(&status)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Join a relative path onto the base URL (`base` is treated as a directory).
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Credential-creation endpoints: versioned API first, then legacy.
pub fn credential_endpoints(base: &str) -> Vec<Endpoint> {
    CREDENTIAL_PATHS
        .iter()
        .map(|path| Endpoint::new(join(base, path), CREATE_SUCCESS))
        .collect()
}

/// Schema endpoints for one credential type, same order.
pub fn schema_endpoints(base: &str, credential_type: &CredentialType) -> Vec<Endpoint> {
    CREDENTIAL_PATHS
        .iter()
        .map(|path| {
            Endpoint::new(
                join(base, &format!("{path}/schema/{credential_type}")),
                SCHEMA_SUCCESS,
            )
        })
        .collect()
}

/// Link that starts the OAuth flow hosted by n8n itself.
///
/// n8n stores the resulting token; nothing is exchanged locally.
pub fn hosted_oauth_url(
    base: &str,
    credential_type: &CredentialType,
    api_key: &str,
) -> Result<String> {
    let target = join(base, &format!("rest/oauth2-credential/{credential_type}"));
    let url = Url::parse_with_params(&target, &[("apiKey", api_key)]).map_err(|e| {
        CredflowError::Configuration(format!("invalid n8n base URL {base:?}: {e}"))
    })?;
    Ok(url.into())
}
