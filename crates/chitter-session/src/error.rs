//! Error types for the session layer.

use chitter_router::RouterError;
use chitter_transport::TransportError;

/// Errors that end a session early.
///
/// Every variant is contained to the one session that hit it; the router
/// only ever learns about it as a disconnect.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading from or writing to a stream failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The router stopped accepting events.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The outbound flow task panicked or was cancelled.
    #[error("outbound flow ended abnormally: {0}")]
    OutboundTask(#[from] tokio::task::JoinError),
}
