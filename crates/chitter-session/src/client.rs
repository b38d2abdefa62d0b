//! Server-side session for one accepted connection.
//!
//! The flow is:
//!   1. The acceptor registers with the router and builds the session.
//!   2. An outbound task drains the mailbox onto the socket.
//!   3. The session task reads lines and dispatches parsed commands.
//!   4. When either side ends (end of stream or I/O error), the session
//!      reports `Disconnect`, stops the outbound task, and closes the socket.

use chitter_protocol::{ClientId, Command, InboundEvent, reply};
use chitter_router::{Mailbox, Registration, RouterHandle};
use chitter_transport::{ConnectionWriter, LineReader};
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::SessionError;

/// One registered client's connection.
pub struct ClientSession<R, W> {
    id: ClientId,
    lines: LineReader<R>,
    writer: ConnectionWriter<W>,
    mailbox: Mailbox,
    router: RouterHandle,
}

impl<R, W> ClientSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Binds a connection to the ID and mailbox the router assigned.
    pub fn new(
        registration: Registration,
        lines: LineReader<R>,
        writer: ConnectionWriter<W>,
        router: RouterHandle,
    ) -> Self {
        Self {
            id: registration.id,
            lines,
            writer,
            mailbox: registration.mailbox,
            router,
        }
    }

    /// Returns the client's ID.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Runs the session until the client's stream ends or fails.
    ///
    /// Cleanup (disconnect + socket close) happens on every path. Returns
    /// `Ok` on a clean end of stream and the first I/O error otherwise.
    pub async fn run(self) -> Result<(), SessionError> {
        let ClientSession {
            id,
            mut lines,
            writer,
            mailbox,
            router,
        } = self;

        tracing::debug!(client_id = %id, "session started");

        let mut outbound = tokio::spawn(run_outbound(mailbox, writer.clone()));

        let result = tokio::select! {
            result = run_inbound(id, &mut lines, &writer, &router) => result,
            joined = &mut outbound => {
                joined.map_err(SessionError::from).and_then(|r| r)
            }
        };
        outbound.abort();

        if let Err(e) = router.disconnect(id).await {
            tracing::debug!(
                client_id = %id,
                error = %e,
                "could not report disconnect"
            );
        }
        if let Err(e) = writer.close().await {
            tracing::debug!(client_id = %id, error = %e, "socket close failed");
        }

        match &result {
            Ok(()) => tracing::info!(client_id = %id, "client stream ended"),
            Err(e) => tracing::warn!(
                client_id = %id,
                error = %e,
                "session ended with error"
            ),
        }
        result
    }
}

/// Reads lines until end of stream, dispatching each one.
async fn run_inbound<R, W>(
    id: ClientId,
    lines: &mut LineReader<R>,
    writer: &ConnectionWriter<W>,
    router: &RouterHandle,
) -> Result<(), SessionError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Whoami => writer.send(&reply::whoami(id)).await?,
            Command::Private { recipient, .. } if recipient == id => {
                writer.send(reply::SELF_MESSAGE_REJECTED).await?;
            }
            Command::Private { recipient, payload } => {
                router
                    .submit(InboundEvent::PrivateMessage {
                        sender: id,
                        recipient,
                        payload,
                    })
                    .await?;
            }
            Command::Broadcast(payload) => {
                router
                    .submit(InboundEvent::Broadcast { sender: id, payload })
                    .await?;
            }
            Command::Unrecognized(prefix) => {
                tracing::warn!(
                    client_id = %id,
                    %prefix,
                    "unrecognized command"
                );
            }
        }
    }
    Ok(())
}

/// Writes mailbox messages verbatim until the router drops the mailbox.
async fn run_outbound<W>(
    mut mailbox: Mailbox,
    writer: ConnectionWriter<W>,
) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin + Send,
{
    while let Some(message) = mailbox.recv().await {
        writer.send(&message).await?;
    }
    Ok(())
}
