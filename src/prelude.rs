//! Convenience re-exports for common use.

pub use crate::auth::providers::linkedin::LinkedInAuth;
pub use crate::auth::{AuthError, AuthorizationCode, Callback, OAuthRequest, TokenGrant};
pub use crate::config::CredflowConfig;
pub use crate::error::{CredflowError, Result};
pub use crate::flow::{ImapFlow, LinkedInFlow};
pub use crate::n8n::{CredentialPayload, CredentialType, ImapCredential, N8nClient};

#[cfg(feature = "imap")]
pub use crate::imap::ImapProbe;
