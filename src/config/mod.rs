//! Process-wide configuration (env > `.env` file, overridable in code).

use std::fmt;
use std::sync::OnceLock;

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<CredflowConfig> = OnceLock::new();

pub const N8N_BASE_URL_VAR: &str = "N8N_BASE_URL";
pub const N8N_API_KEY_VAR: &str = "N8N_API_KEY";
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "REDIRECT_URI";

/// Immutable configuration snapshot shared by every component.
///
/// Missing values are not rejected here: they resolve to empty strings and
/// the resulting request fails at the remote side. Use [`missing`](Self::missing)
/// to warn about them up front.
#[derive(Clone, Default)]
pub struct CredflowConfig {
    n8n_base_url: Option<String>,
    n8n_api_key: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
}

impl fmt::Debug for CredflowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredflowConfig")
            .field("n8n_base_url", &self.n8n_base_url)
            .field("n8n_api_key", &self.n8n_api_key.as_ref().map(|_| ".."))
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| ".."))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl CredflowConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (N8N_BASE_URL, N8N_API_KEY, CLIENT_ID, ...).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        Self {
            n8n_base_url: env_value(N8N_BASE_URL_VAR),
            n8n_api_key: env_value(N8N_API_KEY_VAR),
            client_id: env_value(CLIENT_ID_VAR),
            client_secret: env_value(CLIENT_SECRET_VAR),
            redirect_uri: env_value(REDIRECT_URI_VAR),
        }
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static CredflowConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    pub fn with_n8n_base_url(mut self, url: impl Into<String>) -> Self {
        self.n8n_base_url = Some(url.into());
        self
    }

    pub fn with_n8n_api_key(mut self, key: impl Into<String>) -> Self {
        self.n8n_api_key = Some(key.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    pub fn n8n_base_url(&self) -> &str {
        self.n8n_base_url.as_deref().unwrap_or_default()
    }

    pub fn n8n_api_key(&self) -> &str {
        self.n8n_api_key.as_deref().unwrap_or_default()
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or_default()
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.as_deref().unwrap_or_default()
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uri.as_deref().unwrap_or_default()
    }

    /// Names of the environment variables that have no value.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (N8N_BASE_URL_VAR, &self.n8n_base_url),
            (N8N_API_KEY_VAR, &self.n8n_api_key),
            (CLIENT_ID_VAR, &self.client_id),
            (CLIENT_SECRET_VAR, &self.client_secret),
            (REDIRECT_URI_VAR, &self.redirect_uri),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_empty_strings() {
        let config = CredflowConfig::new();

        assert_eq!(config.n8n_base_url(), "");
        assert_eq!(config.client_secret(), "");
        assert_eq!(config.missing().len(), 5);
    }

    #[test]
    fn overrides_are_reported_as_present() {
        let config = CredflowConfig::new()
            .with_n8n_base_url("http://localhost:5678")
            .with_n8n_api_key("n8n-key");

        assert_eq!(config.n8n_base_url(), "http://localhost:5678");
        assert_eq!(
            config.missing(),
            vec![CLIENT_ID_VAR, CLIENT_SECRET_VAR, REDIRECT_URI_VAR]
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = CredflowConfig::new()
            .with_n8n_api_key("super-secret-key")
            .with_client_secret("client-secret-value");

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("client-secret-value"));
    }
}
