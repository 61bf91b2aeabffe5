//! TCP listener and serial accept loop.
//!
//! Connections are handled strictly one at a time: accept, run the
//! session to completion, accept again, forever. At most one connection
//! is ever live, so nothing is spawned per connection and no limit or
//! backpressure is needed beyond the kernel's accept queue.

use crate::config::Config;
use crate::console::Console;
use crate::session::{run_session, SessionEnd};
use std::io;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Bind the listening endpoint for `config`.
///
/// A bind failure (invalid address, port in use) is fatal and
/// propagates to the caller; nothing after it is. This runs before the
/// operator is prompted for a name, so a bad address fails the process
/// without any console interaction.
pub async fn bind(config: &Config) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(address = %listener.local_addr()?, "Listening for chat clients");
    Ok(listener)
}

/// Server instance: the operator identity chosen once at startup and
/// reused for every session.
pub struct Server {
    operator: String,
}

impl Server {
    /// Create a new server instance.
    pub fn new(operator: String) -> Self {
        Server { operator }
    }

    /// The serial accept loop over an already-bound listener.
    pub async fn serve<R, W>(
        &self,
        listener: TcpListener,
        console: &mut Console<R, W>,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            info!("Waiting for a connection");

            let (mut stream, addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                    continue;
                }
            };

            info!(peer = %addr, "Connection established");

            // The session owns the connection until it ends; the stream
            // drops (and closes) here either way.
            match run_session(&mut stream, &self.operator, console).await {
                Ok(SessionEnd::PeerDisconnected) => {
                    info!(peer = %addr, "Session ended by peer");
                }
                Ok(SessionEnd::OperatorQuit) => {
                    info!(peer = %addr, "Session closed by operator");
                }
                // Session-fatal, not process-fatal: back to accepting
                Err(e) => {
                    warn!(peer = %addr, error = %e, "Session aborted");
                }
            }
        }
    }
}
