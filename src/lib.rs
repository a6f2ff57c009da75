//! credflow: provision third-party credentials into n8n.
//!
//! Runs the LinkedIn OAuth2 authorization-code flow and publishes the
//! resulting token to n8n's credentials API, or publishes IMAP mailbox
//! credentials entered by hand after an optional live login check.
//!
//! # Quick Start
//!
//! ```no_run
//! use credflow::prelude::*;
//!
//! # async fn example(redirect_url: &str) -> credflow::error::Result<()> {
//! let flow = LinkedInFlow::from_config(CredflowConfig::global());
//! println!("Login: {}", flow.start()?.authorize_url);
//!
//! // ...user approves, LinkedIn redirects back with ?code=...
//! let provisioned = flow.provision(redirect_url, None).await?;
//! println!("Created via {}", provisioned.response.endpoint);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod flow;
pub mod n8n;
pub mod prelude;

#[cfg(feature = "imap")]
pub mod imap;

#[cfg(feature = "cli")]
pub mod cli;
