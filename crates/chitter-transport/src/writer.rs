//! Shared write half of a connection.

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::TransportError;

/// A cloneable handle to the write half of a connection.
///
/// Every clone writes through the same async mutex, so whole payloads from
/// different tasks never interleave on the wire.
pub struct ConnectionWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for ConnectionWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> ConnectionWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wraps a write half.
    pub fn new(inner: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Writes `data` in full and flushes.
    pub async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        let mut writer = self.inner.lock().await;
        writer
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    /// Shuts the write direction down, signalling end of stream to the peer.
    pub async fn close(&self) -> Result<(), TransportError> {
        self.inner
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }
}
