//! chatserve: a one-on-one TCP chat server
//!
//! The server accepts a single inbound connection at a time and
//! alternates receive/send turns with a human operator at the console
//! until the peer disconnects or the operator enters `\quit`, then goes
//! back to accepting. The peer speaks first each session.
//!
//! Wire format: plain UTF-8 text, one send/receive call per message,
//! outbound frames shaped as `"{name}> {text}"`. The companion
//! `chatclient` binary speaks the other side of the protocol.

pub mod config;
pub mod console;
pub mod protocol;
pub mod server;
pub mod session;
