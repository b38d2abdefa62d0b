//! Transport layer for Chitter.
//!
//! Provides the [`Transport`] trait that the server's accept loop is written
//! against, a TCP implementation ([`TcpTransport`], [`TcpConnection`]), and
//! the two halves every connection is split into:
//!
//! - [`LineReader`] — newline framing over the read half
//! - [`ConnectionWriter`] — a cloneable, serialized handle to the write half

#![allow(async_fn_in_trait)]

mod error;
mod lines;
mod tcp;
mod writer;

pub use error::TransportError;
pub use lines::LineReader;
pub use tcp::{TcpConnection, TcpReadHalf, TcpTransport, TcpWriteHalf};
pub use writer::ConnectionWriter;

use std::net::SocketAddr;

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Send + 'static;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// Returns the address the transport is listening on.
    fn local_addr(&self) -> Result<SocketAddr, Self::Error>;
}
