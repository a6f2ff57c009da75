//! OAuth2 authorization-code flow: consent URL, callback parsing, token exchange.

pub mod error;
pub mod oauth;
pub mod providers;

pub use error::AuthError;
pub use oauth::{
    build_authorization_url, exchange_authorization_code, parse_callback, AuthorizationCode,
    AuthorizationSession, Callback, OAuthRequest, TokenGrant,
};
