//! Configuration module for the chat server.
//!
//! Everything is supplied on the command line; there is no configuration
//! file, no environment variables beyond `RUST_LOG`, and no persisted
//! state. The port is the single required argument.

use clap::error::ErrorKind;
use clap::Parser;

/// Command-line arguments for the chat server
#[derive(Parser, Debug)]
#[command(name = "chatserve")]
#[command(version = "0.1.0")]
#[command(about = "A one-on-one TCP chat server", long_about = None)]
pub struct CliArgs {
    /// TCP port to listen on
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// A missing port prints usage and exits cleanly (status 0) before
    /// any socket is opened; a malformed argument exits with clap's
    /// usage status.
    pub fn load() -> Self {
        match CliArgs::try_parse() {
            Ok(cli) => cli.into(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(usage_exit_code(&e));
            }
        }
    }

    /// The address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Exit status for an argument-parsing failure.
///
/// Asking for the server without its required port (or for help or the
/// version) is not an error condition; anything else is.
fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::MissingRequiredArgument | ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            0
        }
        _ => 2,
    }
}

impl From<CliArgs> for Config {
    fn from(cli: CliArgs) -> Self {
        Config {
            host: cli.host,
            port: cli.port,
            log_level: cli.log_level,
        }
    }
}
