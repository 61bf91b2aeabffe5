//! Session loop: drives one accepted connection through alternating
//! receive/send turns until the peer disconnects or the operator quits.
//!
//! The turn order is strict: the peer speaks first, every time. Each
//! turn is one bounded read followed by one operator prompt and at most
//! one write. There is no retry, no timeout, and no cancellation; a
//! stalled peer or a stalled operator simply blocks.

use crate::console::Console;
use crate::protocol::{self, RECV_BUFFER_BYTES};
use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// How a session ended. Transport errors are not an end state; they
/// propagate as `io::Error` and are session-fatal only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The peer closed its side; detected as a zero-byte read. A
    /// zero-byte read is always shutdown here: the protocol has no way
    /// to send a distinguishable empty frame, so the ambiguity is
    /// resolved in favor of disconnect.
    PeerDisconnected,
    /// The operator entered the quit directive. The connection is
    /// closed without sending anything further; the peer learns of the
    /// close on its next read.
    OperatorQuit,
}

/// Run one session to completion over `stream`.
///
/// `operator` is the identity chosen once at startup; it prefixes every
/// outbound frame. The stream is closed by the caller dropping it after
/// this returns.
pub async fn run_session<S, R, W>(
    stream: &mut S,
    operator: &str,
    console: &mut Console<R, W>,
) -> io::Result<SessionEnd>
where
    S: AsyncRead + AsyncWrite + Unpin,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = BytesMut::with_capacity(RECV_BUFFER_BYTES);

    loop {
        // Awaiting inbound. One read call is one frame; the buffer
        // capacity is the de facto frame size limit.
        buffer.clear();
        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            console
                .notify("The connection was terminated by the client.")
                .await?;
            return Ok(SessionEnd::PeerDisconnected);
        }
        trace!(bytes = n, "Received frame");

        // Inbound text is opaque and displayed unprefixed, exactly as
        // sent; the peer framed it with its own name. Decoding is
        // lossy: bad UTF-8 from the peer is displayed, not an error.
        let inbound = String::from_utf8_lossy(&buffer[..n]);
        console.show_inbound(&inbound).await?;

        // Composing outbound. Length validation and re-prompting happen
        // inside the console; the quit check is on the raw input.
        let outbound = console.prompt_message(operator).await?;
        if protocol::is_quit(&outbound) {
            console.notify("The client has been disconnected.").await?;
            return Ok(SessionEnd::OperatorQuit);
        }

        let framed = protocol::frame(operator, &outbound);
        stream.write_all(&framed).await?;
        trace!(bytes = framed.len(), "Sent frame");
    }
}
