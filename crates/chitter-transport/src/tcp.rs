//! TCP transport implementation.

use std::net::SocketAddr;

use tokio::io::BufReader;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

use crate::{ConnectionWriter, LineReader, Transport, TransportError};

/// Buffered read half of a TCP connection.
pub type TcpReadHalf = BufReader<OwnedReadHalf>;

/// Write half of a TCP connection.
pub type TcpWriteHalf = OwnedWriteHalf;

/// A TCP [`Transport`] that listens for incoming connections.
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Binds a new listener to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| TransportError::bind(addr, e))?;
        tracing::info!(addr, "TCP transport listening");
        Ok(Self { listener })
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        tracing::debug!(%peer, "accepted TCP connection");
        Ok(TcpConnection { stream, peer })
    }

    fn local_addr(&self) -> Result<SocketAddr, Self::Error> {
        self.listener
            .local_addr()
            .map_err(TransportError::AddressUnavailable)
    }
}

/// A single TCP connection, before it is split into its two halves.
pub struct TcpConnection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpConnection {
    /// Opens an outbound connection to `addr`.
    pub async fn connect(addr: &str) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| TransportError::connect(addr, e))?;
        let peer = stream
            .peer_addr()
            .map_err(TransportError::AddressUnavailable)?;

        tracing::debug!(%peer, "connected");
        Ok(Self { stream, peer })
    }

    /// Returns the remote address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Returns the local address of this end of the connection.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.stream
            .local_addr()
            .map_err(TransportError::AddressUnavailable)
    }

    /// Splits the connection into a line reader and a shared writer.
    pub fn into_parts(
        self,
    ) -> (LineReader<TcpReadHalf>, ConnectionWriter<TcpWriteHalf>) {
        let (read, write) = self.stream.into_split();
        (
            LineReader::new(BufReader::new(read)),
            ConnectionWriter::new(write),
        )
    }
}
