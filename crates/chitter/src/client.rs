//! Client mode: connect to a relay and bridge it to a console.

use chitter_session::{PeerExit, PeerSession};
use chitter_transport::{TcpConnection, TransportError};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

use crate::ChitterError;

/// Connects to `addr` and relays `input` lines to it and its lines to
/// `output` until either side closes.
///
/// Status lines (the connection banner and `Connection was closed...`)
/// go to `output` as well.
pub async fn connect_and_relay<I, O>(
    addr: &str,
    input: I,
    mut output: O,
) -> Result<PeerExit, ChitterError>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let conn = TcpConnection::connect(addr).await?;
    let local = conn.local_addr()?;
    let remote = conn.peer_addr();

    status(
        &mut output,
        &format!(
            "Connection established: {local} <-> {remote}\n\
             Use Ctrl+C to disconnect from the server\n"
        ),
    )
    .await?;

    let (lines, writer) = conn.into_parts();
    let exit = PeerSession::new(lines, writer)
        .run(input, &mut output)
        .await?;
    tracing::debug!(?exit, %remote, "peer session ended");

    status(&mut output, "Connection was closed...\n").await?;
    Ok(exit)
}

async fn status<O>(output: &mut O, text: &str) -> Result<(), ChitterError>
where
    O: AsyncWrite + Unpin,
{
    output
        .write_all(text.as_bytes())
        .await
        .map_err(TransportError::SendFailed)?;
    output.flush().await.map_err(TransportError::SendFailed)?;
    Ok(())
}
