//! Server binary: load configuration, prompt for the operator identity
//! once, then accept and serve chat sessions forever.

use chatserve::config::Config;
use chatserve::console::Console;
use chatserve::server::{self, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

// The protocol is strictly serial: one connection, one operator, one
// turn at a time. A single-threaded runtime is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (exits with usage if the port is missing)
    let config = Config::load();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        host = %config.host,
        port = config.port,
        "Starting chatserve"
    );

    // Open the listening endpoint first: a bad or busy address fails
    // startup before the operator is asked for anything
    let listener = server::bind(&config).await?;

    // The identity is chosen once and reused across all sessions
    let mut console = Console::stdio();
    let operator = console.prompt_name().await?;

    Server::new(operator).serve(listener, &mut console).await?;
    Ok(())
}
