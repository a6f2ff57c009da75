use tracing::info;

use crate::auth::providers::linkedin::LinkedInAuth;
use crate::auth::{parse_callback, AuthorizationSession, Callback, TokenGrant};
use crate::config::CredflowConfig;
use crate::error::Result;
use crate::n8n::credential::LINKEDIN_CREDENTIAL_NAME;
use crate::n8n::{CredentialPayload, CredentialType, EndpointResponse, N8nClient};

/// Result of a completed LinkedIn provisioning run.
#[derive(Debug)]
pub struct Provisioned {
    pub token: TokenGrant,
    pub response: EndpointResponse,
}

/// LinkedIn consent → code exchange → n8n credential.
///
/// # Example
/// ```no_run
/// use credflow::config::CredflowConfig;
/// use credflow::flow::LinkedInFlow;
///
/// # async fn example(redirect: &str) -> credflow::error::Result<()> {
/// let flow = LinkedInFlow::from_config(CredflowConfig::global());
/// let provisioned = flow.provision(redirect, None).await?;
/// println!("{}", provisioned.response.body);
/// # Ok(())
/// # }
/// ```
pub struct LinkedInFlow {
    auth: LinkedInAuth,
    n8n: N8nClient,
    credential_name: String,
}

impl LinkedInFlow {
    pub fn new(auth: LinkedInAuth, n8n: N8nClient) -> Self {
        Self {
            auth,
            n8n,
            credential_name: LINKEDIN_CREDENTIAL_NAME.to_string(),
        }
    }

    pub fn from_config(config: &CredflowConfig) -> Self {
        Self::new(
            LinkedInAuth::from_config(config),
            N8nClient::from_config(config),
        )
    }

    pub fn with_credential_name(mut self, name: impl Into<String>) -> Self {
        self.credential_name = name.into();
        self
    }

    pub fn auth(&self) -> &LinkedInAuth {
        &self.auth
    }

    pub fn start(&self) -> Result<AuthorizationSession> {
        Ok(self.auth.start_auth()?)
    }

    /// Link to n8n's own LinkedIn OAuth flow, bypassing local exchange.
    pub fn hosted_connect_url(&self) -> Result<String> {
        self.n8n.hosted_oauth_url(&CredentialType::LinkedInOAuth2)
    }

    /// Complete the flow from raw callback input.
    ///
    /// A failed token exchange ends the run before anything is sent to n8n.
    pub async fn provision(
        &self,
        callback_input: &str,
        expected_state: Option<&str>,
    ) -> Result<Provisioned> {
        let callback = parse_callback(callback_input)?;
        self.provision_callback(callback, expected_state).await
    }

    pub async fn provision_callback(
        &self,
        callback: Callback,
        expected_state: Option<&str>,
    ) -> Result<Provisioned> {
        let token = self.auth.complete(callback, expected_state).await?;

        let request = self.auth.request();
        let payload = CredentialPayload::linkedin_oauth2(
            self.credential_name.clone(),
            &request.client_id,
            &request.client_secret,
            &token,
        );
        let response = self.n8n.create_credential(&payload).await?;
        info!(endpoint = %response.endpoint, "LinkedIn credential added to n8n");

        Ok(Provisioned { token, response })
    }
}
