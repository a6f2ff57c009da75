//! End-to-end provisioning flows built from the auth, n8n, and imap pieces.

pub mod imap;
pub mod linkedin;

pub use imap::ImapFlow;
pub use linkedin::{LinkedInFlow, Provisioned};
