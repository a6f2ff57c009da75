//! Handlers for `credflow linkedin ...`.

use crate::config::CredflowConfig;
use crate::error::CredflowError;
use crate::flow::LinkedInFlow;

use super::CallbackArgs;

/// Handle `credflow linkedin authorize`.
pub fn handle_authorize(config: &CredflowConfig) -> Result<(), CredflowError> {
    let session = LinkedInFlow::from_config(config).start()?;

    println!("🔗 Login with LinkedIn: {}", session.authorize_url);
    println!("📋 State: {}", session.state);
    println!(
        "After approving, run: credflow linkedin callback '<redirect URL>' --state {}",
        session.state
    );
    Ok(())
}

/// Handle `credflow linkedin callback <input>`.
pub async fn handle_callback(
    config: &CredflowConfig,
    args: &CallbackArgs,
) -> Result<(), CredflowError> {
    let flow = LinkedInFlow::from_config(config).with_credential_name(args.name.clone());
    let provisioned = flow.provision(&args.input, args.state.as_deref()).await?;

    println!("✅ Access token received from LinkedIn");
    if let Some(expires_at) = provisioned.token.expires_at {
        println!("   expires {}", expires_at.format("%Y-%m-%d %H:%M"));
    }
    println!(
        "✅ LinkedIn credentials added to n8n via {}",
        provisioned.response.endpoint
    );
    println!("{}", provisioned.response.body);
    Ok(())
}

/// Handle `credflow linkedin connect`.
pub fn handle_connect(config: &CredflowConfig) -> Result<(), CredflowError> {
    let url = LinkedInFlow::from_config(config).hosted_connect_url()?;

    println!("🔗 Connect LinkedIn: {url}");
    println!("After completing the login, n8n stores the access token itself.");
    Ok(())
}
