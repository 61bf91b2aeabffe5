//! Companion chat client: connects to a chatserve server and drives the
//! other side of the protocol. The client speaks first each turn, then
//! blocks on the server's reply.

use bytes::BytesMut;
use chatserve::console::Console;
use chatserve::protocol::{self, RECV_BUFFER_BYTES};
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the chat client
#[derive(Parser, Debug)]
#[command(name = "chatclient")]
#[command(version = "0.1.0")]
#[command(about = "Client for a one-on-one TCP chat server", long_about = None)]
struct CliArgs {
    /// Server hostname or IP address
    host: String,

    /// Server TCP port
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Connection failure is fatal; there is no retry
    let mut stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    info!(server = %stream.peer_addr()?, "Connected");

    let mut console = Console::stdio();
    let name = console.prompt_name().await?;

    let mut buffer = BytesMut::with_capacity(RECV_BUFFER_BYTES);

    loop {
        // Quit never goes over the wire; the server notices the closed
        // socket on its next read
        let text = console.prompt_message(&name).await?;
        if protocol::is_quit(&text) {
            console.notify("Goodbye!").await?;
            return Ok(());
        }
        stream.write_all(&protocol::frame(&name, &text)).await?;

        buffer.clear();
        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            console
                .notify("The connection was terminated by the server.")
                .await?;
            return Ok(());
        }
        console
            .show_inbound(&String::from_utf8_lossy(&buffer[..n]))
            .await?;
    }
}
