//! n8n credential payloads.

use std::fmt;
use std::str::FromStr;

use bon::Builder;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use strum::EnumString;

use crate::auth::TokenGrant;
use crate::error::CredflowError;

pub const LINKEDIN_CREDENTIAL_NAME: &str = "LinkedIn OAuth Credential";
pub const DEFAULT_IMAP_CREDENTIAL_NAME: &str = "User IMAP Credential";
pub const DEFAULT_IMAP_HOST: &str = "imap.gmail.com";
pub const DEFAULT_IMAP_PORT: u16 = 993;
pub const IMAP_TYPE_VERSION: u32 = 1;

/// n8n credential type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum CredentialType {
    #[strum(serialize = "linkedinOAuth2Api")]
    LinkedInOAuth2,
    #[strum(serialize = "imap")]
    Imap,
    /// Any other n8n credential type by name.
    #[strum(default)]
    Custom(String),
}

impl CredentialType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LinkedInOAuth2 => "linkedinOAuth2Api",
            Self::Imap => "imap",
            Self::Custom(s) => s,
        }
    }

    /// Parse a type name; unknown names become [`CredentialType::Custom`].
    pub fn parse(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| Self::Custom(name.to_string()))
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CredentialType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Body of a credential-creation request.
///
/// Fields are fixed at construction.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialPayload {
    name: String,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    #[serde(rename = "typeVersion", skip_serializing_if = "Option::is_none")]
    type_version: Option<u32>,
    data: Map<String, Value>,
}

impl CredentialPayload {
    pub fn new(
        name: impl Into<String>,
        credential_type: CredentialType,
        type_version: Option<u32>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            credential_type,
            type_version,
            data,
        }
    }

    /// `linkedinOAuth2Api` credential carrying a freshly exchanged token.
    pub fn linkedin_oauth2(
        name: impl Into<String>,
        client_id: &str,
        client_secret: &str,
        grant: &TokenGrant,
    ) -> Self {
        let data = object(json!({
            "clientId": client_id,
            "clientSecret": client_secret,
            "accessToken": grant.access_token,
            "refreshToken": grant.refresh_token,
        }));
        Self::new(name, CredentialType::LinkedInOAuth2, None, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential_type(&self) -> &CredentialType {
        &self.credential_type
    }

    pub fn type_version(&self) -> Option<u32> {
        self.type_version
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// IMAP mailbox settings entered by the user.
///
/// # Example
/// ```
/// use credflow::n8n::ImapCredential;
///
/// let credential = ImapCredential::builder()
///     .user("user@example.com")
///     .password("app-password")
///     .build();
/// assert_eq!(credential.port, 993);
/// assert!(credential.secure);
/// ```
#[derive(Clone, Builder)]
pub struct ImapCredential {
    #[builder(into, default = DEFAULT_IMAP_CREDENTIAL_NAME.to_string())]
    pub name: String,
    #[builder(into)]
    pub user: String,
    #[builder(into)]
    pub password: String,
    #[builder(into, default = DEFAULT_IMAP_HOST.to_string())]
    pub host: String,
    #[builder(default = DEFAULT_IMAP_PORT)]
    pub port: u16,
    #[builder(default = true)]
    pub secure: bool,
    #[builder(default)]
    pub allow_unauthorized_certs: bool,
}

impl fmt::Debug for ImapCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImapCredential")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"..")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("allow_unauthorized_certs", &self.allow_unauthorized_certs)
            .finish()
    }
}

impl ImapCredential {
    /// Username and password are needed before anything is sent to n8n.
    pub fn validate_for_publish(&self) -> Result<(), CredflowError> {
        if self.user.is_empty() || self.password.is_empty() {
            return Err(CredflowError::InvalidArgument(
                "Enter the email username and password.".to_string(),
            ));
        }
        Ok(())
    }

    /// A live login additionally needs the host.
    pub fn validate_for_probe(&self) -> Result<(), CredflowError> {
        if self.host.is_empty() || self.user.is_empty() || self.password.is_empty() {
            return Err(CredflowError::InvalidArgument(
                "Provide host, username and password to test.".to_string(),
            ));
        }
        Ok(())
    }

    /// n8n `imap` credential, type version 1.
    pub fn to_payload(&self) -> CredentialPayload {
        let data = object(json!({
            "user": self.user,
            "password": self.password,
            "host": self.host,
            "port": self.port,
            "secure": self.secure,
            "allowUnauthorizedCerts": self.allow_unauthorized_certs,
        }));
        CredentialPayload::new(
            self.name.clone(),
            CredentialType::Imap,
            Some(IMAP_TYPE_VERSION),
            data,
        )
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
