/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The listening socket could not be bound.
    #[error("failed to listen on {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// An outbound connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accepting an incoming connection failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The socket has no usable address (e.g. it was already torn down).
    #[error("address unavailable: {0}")]
    AddressUnavailable(#[source] std::io::Error),
}

impl TransportError {
    pub(crate) fn bind(addr: &str, source: std::io::Error) -> Self {
        Self::BindFailed {
            addr: addr.to_string(),
            source,
        }
    }

    pub(crate) fn connect(addr: &str, source: std::io::Error) -> Self {
        Self::ConnectFailed {
            addr: addr.to_string(),
            source,
        }
    }
}

