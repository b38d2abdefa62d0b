//! `ChitterServer` builder and accept loop.
//!
//! This is the entry point for running a relay. It ties together all the
//! layers: transport → session → router.

use std::net::SocketAddr;
use std::time::Duration;

use chitter_router::{RouterError, RouterHandle, spawn_router};
use chitter_session::ClientSession;
use chitter_transport::{TcpTransport, Transport};

use crate::{ChitterError, RelayConfig};

/// Pause after a failed accept before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Builder for configuring and starting a relay.
///
/// # Example
///
/// ```rust,ignore
/// let server = ChitterServer::builder()
///     .bind("127.0.0.1:4000")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct ChitterServerBuilder {
    bind_addr: String,
    config: RelayConfig,
}

impl ChitterServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            config: RelayConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets capacities and limits. `bind_host` is not consulted here.
    pub fn config(mut self, config: RelayConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the listener and starts the router.
    pub async fn build(self) -> Result<ChitterServer, ChitterError> {
        self.config.validate()?;

        let transport = TcpTransport::bind(&self.bind_addr).await?;
        let router = spawn_router(self.config.router_config())?;

        Ok(ChitterServer { transport, router })
    }
}

impl Default for ChitterServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound relay. Call [`run()`](Self::run) to start accepting clients.
pub struct ChitterServer {
    transport: TcpTransport,
    router: RouterHandle,
}

impl ChitterServer {
    /// Creates a new builder.
    pub fn builder() -> ChitterServerBuilder {
        ChitterServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ChitterError> {
        Ok(self.transport.local_addr()?)
    }

    /// Returns a handle to this server's router.
    pub fn router(&self) -> RouterHandle {
        self.router.clone()
    }

    /// Runs the accept loop.
    ///
    /// Each accepted connection is registered with the router and gets its
    /// own session task. Only returns if the router goes away.
    pub async fn run(mut self) -> Result<(), ChitterError> {
        tracing::info!("Chitter relay running");

        loop {
            let conn = match self.transport.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            let peer = conn.peer_addr();

            let registration = match self.router.register().await {
                Ok(registration) => registration,
                Err(RouterError::Full { max_clients }) => {
                    tracing::warn!(
                        %peer,
                        max_clients,
                        "relay full, closing connection"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let (lines, writer) = conn.into_parts();
            let session = ClientSession::new(
                registration,
                lines,
                writer,
                self.router.clone(),
            );
            let client_id = session.id();
            tracing::info!(%peer, %client_id, "client connected");

            tokio::spawn(async move {
                if let Err(e) = session.run().await {
                    tracing::debug!(
                        %client_id,
                        error = %e,
                        "connection ended with error"
                    );
                }
            });
        }
    }
}
