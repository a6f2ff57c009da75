//! OAuth providers whose credentials can be provisioned into n8n.

pub mod linkedin;
