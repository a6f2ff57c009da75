//! n8n credentials API: payloads, candidate endpoints, and the client.

pub mod client;
pub mod credential;
pub mod endpoints;

pub use client::{EndpointFailure, EndpointResponse, FailureReason, N8nClient, ResponseBody};
pub use credential::{CredentialPayload, CredentialType, ImapCredential};
pub use endpoints::Endpoint;
