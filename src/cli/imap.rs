//! Handlers for `credflow imap ...`.

use crate::config::CredflowConfig;
use crate::error::CredflowError;
use crate::flow::ImapFlow;
use crate::n8n::N8nClient;

use super::ImapCreateArgs;
#[cfg(feature = "imap")]
use super::ImapMailboxArgs;

fn flow(config: &CredflowConfig) -> ImapFlow {
    ImapFlow::new(N8nClient::from_config(config))
}

/// Handle `credflow imap schema`.
pub async fn handle_schema(config: &CredflowConfig) -> Result<(), CredflowError> {
    let schema = flow(config).fetch_schema().await?;

    println!("✅ Schema fetched from {}", schema.endpoint);
    println!("{}", schema.body);
    Ok(())
}

/// Handle `credflow imap test`.
#[cfg(feature = "imap")]
pub async fn handle_test(
    config: &CredflowConfig,
    args: &ImapMailboxArgs,
) -> Result<(), CredflowError> {
    let credential = args.to_credential("");
    flow(config).probe(&credential).await?;

    println!("✅ IMAP login successful from this machine.");
    Ok(())
}

/// Handle `credflow imap create`.
pub async fn handle_create(
    config: &CredflowConfig,
    args: &ImapCreateArgs,
) -> Result<(), CredflowError> {
    let credential = args.mailbox.to_credential(&args.name);
    let created = flow(config).create(&credential).await?;

    println!("✅ Credential created at {}", created.endpoint);
    println!("Response:");
    println!("{}", created.body);
    Ok(())
}
