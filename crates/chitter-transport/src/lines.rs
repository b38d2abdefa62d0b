//! Newline framing over an async byte stream.

use futures_util::Stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::TransportError;

/// Produces `\n`-terminated lines from a buffered byte stream.
///
/// Lines are returned with their terminator. End of stream is `Ok(None)`;
/// any other read failure is [`TransportError::ReceiveFailed`]. Bytes read
/// before a failure (or before the future was dropped in a `select!`) are
/// kept, so calling [`next_line`](Self::next_line) again resumes the same
/// line.
pub struct LineReader<R> {
    inner: R,
    pending: Vec<u8>,
    finished: bool,
}

impl<R> LineReader<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Wraps a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            finished: false,
        }
    }

    /// Reads the next complete line.
    ///
    /// An unterminated fragment at end of stream is discarded. Once end of
    /// stream has been seen, every later call returns `Ok(None)`.
    pub async fn next_line(
        &mut self,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        if self.finished {
            return Ok(None);
        }

        let read = self
            .inner
            .read_until(b'\n', &mut self.pending)
            .await
            .map_err(TransportError::ReceiveFailed)?;

        if read == 0 || self.pending.last() != Some(&b'\n') {
            if !self.pending.is_empty() {
                tracing::trace!(
                    bytes = self.pending.len(),
                    "discarding unterminated trailing fragment"
                );
                self.pending.clear();
            }
            self.finished = true;
            return Ok(None);
        }

        Ok(Some(std::mem::take(&mut self.pending)))
    }

    /// Consumes the reader and yields its lines as a stream.
    ///
    /// The stream ends at end of stream and yields `Err` on a read failure.
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<Vec<u8>, TransportError>> {
        futures_util::stream::try_unfold(self, |mut reader| async move {
            let line = reader.next_line().await?;
            Ok(line.map(|line| (line, reader)))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures_util::TryStreamExt;
    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;

    #[tokio::test]
    async fn test_next_line_keeps_terminator() {
        let mut reader = LineReader::new(&b"hello\nworld\n"[..]);

        let first = reader.next_line().await.unwrap();
        let second = reader.next_line().await.unwrap();
        assert_eq!(first, Some(b"hello\n".to_vec()));
        assert_eq!(second, Some(b"world\n".to_vec()));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_next_line_discards_unterminated_fragment() {
        let mut reader = LineReader::new(&b"complete\npartial"[..]);

        assert_eq!(
            reader.next_line().await.unwrap(),
            Some(b"complete\n".to_vec())
        );
        assert_eq!(reader.next_line().await.unwrap(), None);
        // Stays finished.
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_next_line_empty_stream_is_end_of_stream() {
        let mut reader = LineReader::new(&b""[..]);
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_next_line_returns_blank_lines() {
        let mut reader = LineReader::new(&b"\n\nx\n"[..]);

        assert_eq!(reader.next_line().await.unwrap(), Some(b"\n".to_vec()));
        assert_eq!(reader.next_line().await.unwrap(), Some(b"\n".to_vec()));
        assert_eq!(reader.next_line().await.unwrap(), Some(b"x\n".to_vec()));
    }

    #[tokio::test]
    async fn test_next_line_waits_for_terminator_across_writes() {
        let (mut client, server) = tokio::io::duplex(64);
        let mut reader = LineReader::new(BufReader::new(server));

        let writer = tokio::spawn(async move {
            client.write_all(b"split ").await.unwrap();
            tokio::task::yield_now().await;
            client.write_all(b"line\n").await.unwrap();
        });

        assert_eq!(
            reader.next_line().await.unwrap(),
            Some(b"split line\n".to_vec())
        );
        writer.await.unwrap();
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_into_stream_collects_all_lines() {
        let reader = LineReader::new(&b"a\nb\nc"[..]);
        let lines: Vec<Vec<u8>> =
            reader.into_stream().try_collect().await.unwrap();
        assert_eq!(lines, vec![b"a\n".to_vec(), b"b\n".to_vec()]);
    }
}
