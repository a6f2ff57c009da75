use std::time::Duration;

use crate::error::{CredflowError, Result};
use crate::n8n::{CredentialType, EndpointResponse, ImapCredential, N8nClient};

pub const SCHEMA_TIMEOUT: Duration = Duration::from_secs(10);
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(15);

/// Manually entered IMAP credential → optional live check → n8n.
///
/// Input is validated locally before any request goes out.
pub struct ImapFlow {
    n8n: N8nClient,
}

impl ImapFlow {
    /// Wraps `n8n` with the short per-call timeouts used for this flow.
    pub fn new(n8n: N8nClient) -> Self {
        Self {
            n8n: n8n
                .with_schema_timeout(SCHEMA_TIMEOUT)
                .with_publish_timeout(PUBLISH_TIMEOUT),
        }
    }

    pub async fn fetch_schema(&self) -> Result<EndpointResponse> {
        self.require_connection()?;
        self.n8n.fetch_schema(&CredentialType::Imap).await
    }

    #[cfg(feature = "imap")]
    pub async fn probe(&self, credential: &ImapCredential) -> Result<()> {
        credential.validate_for_probe()?;
        crate::imap::ImapProbe::from_credential(credential)
            .check()
            .await
    }

    pub async fn create(&self, credential: &ImapCredential) -> Result<EndpointResponse> {
        self.require_connection()?;
        credential.validate_for_publish()?;
        self.n8n.create_credential(&credential.to_payload()).await
    }

    fn require_connection(&self) -> Result<()> {
        if !self.n8n.is_configured() {
            return Err(CredflowError::Configuration(
                "Enter n8n base URL and API key first.".to_string(),
            ));
        }
        Ok(())
    }
}
