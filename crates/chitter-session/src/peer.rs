//! Client-side bridge between a local console and the relay.

use chitter_transport::{ConnectionWriter, LineReader, TransportError};
use futures_util::TryStreamExt;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

use crate::SessionError;

/// Which side ended a [`PeerSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerExit {
    /// The relay closed the connection.
    RemoteClosed,
    /// Local input reached end of stream.
    InputClosed,
}

/// Copies console lines to the relay and relay lines to the console.
pub struct PeerSession<R, W> {
    remote_lines: LineReader<R>,
    remote: ConnectionWriter<W>,
}

impl<R, W> PeerSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(
        remote_lines: LineReader<R>,
        remote: ConnectionWriter<W>,
    ) -> Self {
        Self {
            remote_lines,
            remote,
        }
    }

    /// Bridges until either direction ends, then closes the connection.
    pub async fn run<I, O>(
        self,
        input: I,
        mut output: O,
    ) -> Result<PeerExit, SessionError>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let PeerSession {
            remote_lines,
            remote,
        } = self;

        let incoming = remote_lines.into_stream();
        let outgoing = LineReader::new(input).into_stream();
        tokio::pin!(incoming);
        tokio::pin!(outgoing);

        let result = loop {
            tokio::select! {
                line = outgoing.try_next() => match line {
                    Ok(Some(line)) => {
                        if let Err(e) = remote.send(&line).await {
                            break Err(e.into());
                        }
                    }
                    Ok(None) => break Ok(PeerExit::InputClosed),
                    Err(e) => break Err(e.into()),
                },
                line = incoming.try_next() => match line {
                    Ok(Some(line)) => {
                        if let Err(e) = write_line(&mut output, &line).await {
                            break Err(e.into());
                        }
                    }
                    Ok(None) => break Ok(PeerExit::RemoteClosed),
                    Err(e) => break Err(e.into()),
                },
            }
        };

        if let Err(e) = remote.close().await {
            tracing::debug!(error = %e, "socket close failed");
        }
        tracing::debug!(?result, "peer session finished");
        result
    }
}

async fn write_line<O>(
    output: &mut O,
    line: &[u8],
) -> Result<(), TransportError>
where
    O: AsyncWrite + Unpin,
{
    output
        .write_all(line)
        .await
        .map_err(TransportError::SendFailed)?;
    output.flush().await.map_err(TransportError::SendFailed)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
    use tokio::time::timeout;

    use super::*;

    const WAIT: Duration = Duration::from_secs(2);

    type Remote = (
        LineReader<BufReader<ReadHalf<DuplexStream>>>,
        WriteHalf<DuplexStream>,
    );

    /// A peer session wired to an in-memory "relay" end.
    fn peer() -> (
        PeerSession<BufReader<ReadHalf<DuplexStream>>, WriteHalf<DuplexStream>>,
        Remote,
    ) {
        let (local, relay) = tokio::io::duplex(1024);
        let (local_read, local_write) = tokio::io::split(local);
        let (relay_read, relay_write) = tokio::io::split(relay);

        let session = PeerSession::new(
            LineReader::new(BufReader::new(local_read)),
            ConnectionWriter::new(local_write),
        );
        (
            session,
            (LineReader::new(BufReader::new(relay_read)), relay_write),
        )
    }

    #[tokio::test]
    async fn test_input_lines_forwarded_until_input_closes() {
        let (session, (mut relay_lines, _relay_write)) = peer();

        let exit = session
            .run(&b"whoami\nall:hi\n"[..], tokio::io::sink())
            .await
            .unwrap();
        assert_eq!(exit, PeerExit::InputClosed);

        assert_eq!(
            relay_lines.next_line().await.unwrap(),
            Some(b"whoami\n".to_vec())
        );
        assert_eq!(
            relay_lines.next_line().await.unwrap(),
            Some(b"all:hi\n".to_vec())
        );
        // The session closed its side.
        assert_eq!(relay_lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_relay_lines_written_to_output() {
        let (session, (_relay_lines, mut relay_write)) = peer();
        let (console_in_writer, console_in) = tokio::io::duplex(64);
        let (output, mut console_out) = tokio::io::duplex(1024);

        let running =
            tokio::spawn(session.run(BufReader::new(console_in), output));

        relay_write.write_all(b"chitter: 0\n3: hey\n").await.unwrap();
        relay_write.shutdown().await.unwrap();

        let exit = timeout(WAIT, running).await.unwrap().unwrap().unwrap();
        assert_eq!(exit, PeerExit::RemoteClosed);

        let mut printed = Vec::new();
        console_out.read_to_end(&mut printed).await.unwrap();
        assert_eq!(printed, b"chitter: 0\n3: hey\n");
        drop(console_in_writer);
    }
}
