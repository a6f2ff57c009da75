//! IMAP connectivity probe: connect, login, logout.

use async_imap::Client;
use async_native_tls::TlsConnector;
use futures::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::error::CredflowError;
use crate::n8n::ImapCredential;

/// Plain TCP stream wrapped for the async-io reactor.
type AsyncTcpStream = async_io::Async<std::net::TcpStream>;

/// One-shot login check against an IMAP server.
///
/// Errors carry the underlying message (DNS, TLS, server `NO` response)
/// without further classification.
#[derive(Clone)]
pub struct ImapProbe {
    host: String,
    port: u16,
    username: String,
    password: String,
    tls: bool,
    accept_invalid_certs: bool,
}

impl ImapProbe {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            tls: true,
            accept_invalid_certs: false,
        }
    }

    pub fn from_credential(credential: &ImapCredential) -> Self {
        Self::new(
            credential.host.clone(),
            credential.port,
            credential.user.clone(),
            credential.password.clone(),
        )
        .with_tls(credential.secure)
        .accept_invalid_certs(credential.allow_unauthorized_certs)
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Connect, log in, and log out immediately.
    pub async fn check(&self) -> Result<(), CredflowError> {
        let addr = format!("{}:{}", self.host, self.port);
        debug!(%addr, tls = self.tls, "connecting to IMAP server");

        // Resolution and connect block; keep them off the async worker.
        let std_stream = tokio::task::spawn_blocking(move || std::net::TcpStream::connect(addr))
            .await
            .map_err(imap_error)?
            .map_err(imap_error)?;
        std_stream.set_nonblocking(true).map_err(imap_error)?;
        let tcp_stream = AsyncTcpStream::new(std_stream).map_err(imap_error)?;

        if self.tls {
            let tls_stream = TlsConnector::new()
                .danger_accept_invalid_certs(self.accept_invalid_certs)
                .connect(&self.host, tcp_stream)
                .await
                .map_err(imap_error)?;
            self.login_logout(Client::new(tls_stream)).await?;
        } else {
            self.login_logout(Client::new(tcp_stream)).await?;
        }

        info!(host = %self.host, "IMAP login succeeded");
        Ok(())
    }

    async fn login_logout<T>(&self, client: Client<T>) -> Result<(), CredflowError>
    where
        T: AsyncRead + AsyncWrite + Unpin + std::fmt::Debug + Send,
    {
        let mut session = client
            .login(&self.username, &self.password)
            .await
            .map_err(|(err, _client)| imap_error(err))?;
        session.logout().await.map_err(imap_error)
    }
}

fn imap_error(err: impl std::fmt::Display) -> CredflowError {
    CredflowError::Imap(err.to_string())
}
