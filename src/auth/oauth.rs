//! OAuth2 authorization-code primitives shared by providers.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::error::AuthError;

/// Base used to parse bare callback query strings.
const CALLBACK_BASE: &str = "http://localhost/";

/// Query keys a provider redirect can carry.
const CALLBACK_KEYS: [&str; 4] = ["code", "state", "error", "error_description"];

/// Static OAuth client settings for one deployment.
#[derive(Clone, Default)]
pub struct OAuthRequest {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl fmt::Debug for OAuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl OAuthRequest {
    /// Space-delimited scope list as sent to the provider.
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}

/// Single-use authorization code received on the redirect callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authorization URL plus the `state` value embedded in it.
///
/// The caller opens `authorize_url` in a browser; the provider redirects back
/// with `code` and the same `state`.
#[derive(Debug, Clone)]
pub struct AuthorizationSession {
    pub authorize_url: String,
    pub state: String,
}

/// What a redirect callback carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// No code yet; the user has not been through the provider.
    Pending,
    Code {
        code: AuthorizationCode,
        state: Option<String>,
    },
}

impl Callback {
    /// Check the returned `state` against the expected one.
    ///
    /// A callback without `state` is accepted; the comparison only happens
    /// when both sides have a value.
    pub fn verify_state(&self, expected: Option<&str>) -> Result<(), AuthError> {
        let (Some(expected), Callback::Code { state: Some(actual), .. }) = (expected, self) else {
            return Ok(());
        };
        if actual != expected {
            return Err(AuthError::StateMismatch {
                expected: expected.to_string(),
                actual: actual.clone(),
            });
        }
        Ok(())
    }

    pub fn into_code(self) -> Result<AuthorizationCode, AuthError> {
        match self {
            Callback::Code { code, .. } => Ok(code),
            Callback::Pending => Err(AuthError::MissingCode),
        }
    }
}

/// Access token obtained from a code exchange. Held in memory only.
#[derive(Clone)]
pub struct TokenGrant {
    pub access_token: String,
    /// Empty when the provider did not issue one.
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"..")
            .field("refresh_token", &(!self.refresh_token.is_empty()).then_some(".."))
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

/// Build the provider authorization URL for the code flow.
///
/// Fails only when `authorize_endpoint` is not an absolute URL.
pub fn build_authorization_url(
    authorize_endpoint: &str,
    request: &OAuthRequest,
    state: Option<&str>,
) -> Result<String, AuthError> {
    let scope = request.scope_param();
    let mut params = vec![
        ("response_type", "code"),
        ("client_id", request.client_id.as_str()),
        ("redirect_uri", request.redirect_uri.as_str()),
        ("scope", scope.as_str()),
    ];
    if let Some(state) = state {
        params.push(("state", state));
    }
    let url = Url::parse_with_params(authorize_endpoint, &params)
        .map_err(|e| AuthError::InvalidUrl(format!("{authorize_endpoint}: {e}")))?;
    Ok(url.into())
}

/// Parse what came back on the redirect.
///
/// Accepts a full redirect URL, a bare query string (`code=..&state=..`), or
/// the code on its own.
pub fn parse_callback(input: &str) -> Result<Callback, AuthError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Callback::Pending);
    }

    let url = if input.starts_with("http://") || input.starts_with("https://") {
        Url::parse(input).map_err(|e| AuthError::InvalidResponse(format!("bad callback URL: {e}")))?
    } else {
        match callback_query(input)? {
            Some(url) => url,
            None => {
                return Ok(Callback::Code {
                    code: AuthorizationCode::new(input),
                    state: None,
                })
            }
        }
    };

    let mut code = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::AccessDenied(match error_description {
            Some(description) => format!("{error}: {description}"),
            None => error,
        }));
    }

    Ok(match code.filter(|c| !c.is_empty()) {
        Some(code) => Callback::Code {
            code: AuthorizationCode::new(code),
            state,
        },
        None => Callback::Pending,
    })
}

/// Treat `input` as a query string only if it looks like one.
///
/// Opaque codes may themselves contain `=` (base64 padding), so a bare
/// `key=value` shape is not enough.
fn callback_query(input: &str) -> Result<Option<Url>, AuthError> {
    if !input.starts_with('?') && !input.contains('=') {
        return Ok(None);
    }
    let mut url =
        Url::parse(CALLBACK_BASE).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
    url.set_query(Some(input.trim_start_matches('?')));

    let recognized = input.starts_with('?')
        || url
            .query_pairs()
            .any(|(key, _)| CALLBACK_KEYS.contains(&key.as_ref()));
    Ok(recognized.then_some(url))
}

/// Exchange an authorization code at the token endpoint.
///
/// Anything other than HTTP 200 is returned verbatim as
/// [`AuthError::TokenEndpoint`]. The code is never retried.
pub async fn exchange_authorization_code(
    client: &reqwest::Client,
    token_url: &str,
    request: &OAuthRequest,
    code: &AuthorizationCode,
) -> Result<TokenGrant, AuthError> {
    debug!(token_url, "exchanging authorization code");

    let resp = client
        .post(token_url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", request.redirect_uri.as_str()),
            ("client_id", request.client_id.as_str()),
            ("client_secret", request.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if status != StatusCode::OK {
        return Err(AuthError::TokenEndpoint {
            status: status.as_u16(),
            body,
        });
    }

    let payload: TokenExchangeResponse = serde_json::from_str(&body)?;
    let access_token = payload
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidResponse("token response has no access_token".into()))?;

    Ok(TokenGrant {
        access_token,
        refresh_token: payload.refresh_token.unwrap_or_default(),
        expires_at: payload
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
        scope: payload.scope,
    })
}

/// Random hex value for the `state` parameter.
pub(crate) fn random_state() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}
