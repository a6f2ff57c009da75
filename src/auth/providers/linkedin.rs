use tracing::info;

use crate::auth::error::AuthError;
use crate::auth::oauth::{
    build_authorization_url, exchange_authorization_code, random_state, AuthorizationCode,
    AuthorizationSession, Callback, OAuthRequest, TokenGrant,
};
use crate::config::CredflowConfig;

pub const LINKEDIN_AUTHORIZE_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
pub const LINKEDIN_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
pub const LINKEDIN_SCOPES: &[&str] = &["r_liteprofile", "r_emailaddress", "w_member_social"];

/// LinkedIn OAuth2 authorization-code client.
///
/// Builds the consent URL and exchanges the code returned on the redirect.
/// Tokens are returned to the caller and never stored.
///
/// # Example
/// ```no_run
/// use credflow::auth::providers::linkedin::LinkedInAuth;
/// use credflow::config::CredflowConfig;
///
/// # fn example() -> Result<(), credflow::auth::AuthError> {
/// let auth = LinkedInAuth::from_config(&CredflowConfig::from_env());
/// let session = auth.start_auth()?;
/// println!("Open {}", session.authorize_url);
/// # Ok(())
/// # }
/// ```
pub struct LinkedInAuth {
    client: reqwest::Client,
    request: OAuthRequest,
    authorize_url: String,
    token_url: String,
}

impl LinkedInAuth {
    pub fn new(request: OAuthRequest) -> Self {
        Self {
            client: reqwest::Client::new(),
            request,
            authorize_url: LINKEDIN_AUTHORIZE_URL.to_string(),
            token_url: LINKEDIN_TOKEN_URL.to_string(),
        }
    }

    /// Client id, secret and redirect URI from config, with the default scopes.
    pub fn from_config(config: &CredflowConfig) -> Self {
        Self::new(OAuthRequest {
            client_id: config.client_id().to_string(),
            client_secret: config.client_secret().to_string(),
            redirect_uri: config.redirect_uri().to_string(),
            scopes: LINKEDIN_SCOPES.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn request(&self) -> &OAuthRequest {
        &self.request
    }

    /// Authorization URL without a `state` parameter.
    pub fn authorization_url(&self) -> Result<String, AuthError> {
        build_authorization_url(&self.authorize_url, &self.request, None)
    }

    /// Begin an authorization: fresh `state` and the URL carrying it.
    pub fn start_auth(&self) -> Result<AuthorizationSession, AuthError> {
        let state = random_state();
        let authorize_url =
            build_authorization_url(&self.authorize_url, &self.request, Some(&state))?;
        Ok(AuthorizationSession {
            authorize_url,
            state,
        })
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &AuthorizationCode) -> Result<TokenGrant, AuthError> {
        let grant =
            exchange_authorization_code(&self.client, &self.token_url, &self.request, code).await?;
        info!(
            has_refresh_token = !grant.refresh_token.is_empty(),
            "LinkedIn access token received"
        );
        Ok(grant)
    }

    /// Verify the callback and exchange its code.
    ///
    /// State is checked before any network call; a callback without a code
    /// fails with [`AuthError::MissingCode`].
    pub async fn complete(
        &self,
        callback: Callback,
        expected_state: Option<&str>,
    ) -> Result<TokenGrant, AuthError> {
        callback.verify_state(expected_state)?;
        let code = callback.into_code()?;
        self.exchange_code(&code).await
    }
}
