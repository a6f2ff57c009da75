//! CLI entry point for credflow.

pub mod errors;
pub mod imap;
pub mod linkedin;

use clap::{Args, Parser, Subcommand};

use crate::config::CredflowConfig;
use crate::n8n::credential::{
    DEFAULT_IMAP_CREDENTIAL_NAME, DEFAULT_IMAP_HOST, DEFAULT_IMAP_PORT, LINKEDIN_CREDENTIAL_NAME,
};
use crate::n8n::ImapCredential;

/// Provision LinkedIn and IMAP credentials into n8n
#[derive(Parser, Debug)]
#[command(name = "credflow", version, about = "Provision LinkedIn and IMAP credentials into n8n")]
pub struct Cli {
    /// n8n base URL including protocol (overrides N8N_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// n8n API key (overrides N8N_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// LinkedIn OAuth2 credential setup
    Linkedin(LinkedinArgs),
    /// IMAP (Email Trigger) credential setup
    Imap(ImapArgs),
}

#[derive(Parser, Debug)]
pub struct LinkedinArgs {
    #[command(subcommand)]
    pub command: LinkedinCommands,
}

#[derive(Subcommand, Debug)]
pub enum LinkedinCommands {
    /// Print the LinkedIn login URL
    Authorize,
    /// Exchange the code from the redirect and push the credential to n8n
    Callback(CallbackArgs),
    /// Print the link to n8n's own LinkedIn OAuth flow
    Connect,
}

#[derive(Parser, Debug)]
pub struct CallbackArgs {
    /// Redirect URL, query string, or bare authorization code
    pub input: String,

    /// State printed by `authorize`; checked against the redirect
    #[arg(long)]
    pub state: Option<String>,

    /// Credential name as it will appear in n8n
    #[arg(long, default_value = LINKEDIN_CREDENTIAL_NAME)]
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct ImapArgs {
    #[command(subcommand)]
    pub command: ImapCommands,
}

#[derive(Subcommand, Debug)]
pub enum ImapCommands {
    /// Fetch the IMAP credential schema from n8n
    Schema,
    /// Test the IMAP login from this machine
    #[cfg(feature = "imap")]
    Test(ImapMailboxArgs),
    /// Create the IMAP credential in n8n
    Create(ImapCreateArgs),
}

/// Mailbox connection settings.
#[derive(Args, Debug)]
pub struct ImapMailboxArgs {
    /// Email address / username
    #[arg(long, default_value = "")]
    pub user: String,

    /// IMAP password or app password
    #[arg(long, default_value = "")]
    pub password: String,

    #[arg(long, default_value = DEFAULT_IMAP_HOST)]
    pub host: String,

    #[arg(long, default_value_t = DEFAULT_IMAP_PORT)]
    pub port: u16,

    /// Connect without SSL/TLS
    #[arg(long)]
    pub no_tls: bool,

    /// Allow self-signed certificates
    #[arg(long)]
    pub allow_self_signed: bool,
}

#[derive(Args, Debug)]
pub struct ImapCreateArgs {
    #[command(flatten)]
    pub mailbox: ImapMailboxArgs,

    /// Credential name as it will appear in n8n
    #[arg(long, default_value = DEFAULT_IMAP_CREDENTIAL_NAME)]
    pub name: String,
}

impl ImapMailboxArgs {
    pub fn to_credential(&self, name: &str) -> ImapCredential {
        ImapCredential::builder()
            .name(name)
            .user(self.user.as_str())
            .password(self.password.as_str())
            .host(self.host.as_str())
            .port(self.port)
            .secure(!self.no_tls)
            .allow_unauthorized_certs(self.allow_self_signed)
            .build()
    }
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply `--base-url` / `--api-key` on top of the loaded config.
    pub fn apply_overrides(&self, mut config: CredflowConfig) -> CredflowConfig {
        if let Some(url) = &self.base_url {
            config = config.with_n8n_base_url(url.clone());
        }
        if let Some(key) = &self.api_key {
            config = config.with_n8n_api_key(key.clone());
        }
        config
    }
}
