//! Operator console: prompts, input validation loops, and chat display.
//!
//! The console is the interactive surface of the server. Prompts and chat
//! text go here; operational status goes to tracing. The reader and
//! writer are generic so tests can script the operator with in-memory
//! buffers.

use crate::protocol::{self, MAX_NAME_CHARS};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// The operator's input/output pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// Console over the process stdin/stdout.
    pub fn stdio() -> Self {
        Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Prompt for the operator's name until a valid one is entered.
    ///
    /// Called once at startup; the accepted name is reused for every
    /// subsequent session without re-prompting.
    pub async fn prompt_name(&mut self) -> io::Result<String> {
        loop {
            self.write_prompt(&format!(
                "Please enter your name ({MAX_NAME_CHARS} chars max): "
            ))
            .await?;
            let name = self.read_trimmed_line().await?;
            match protocol::validate_name(&name) {
                Ok(()) => return Ok(name),
                Err(e) => self.notify(&e.to_string()).await?,
            }
        }
    }

    /// Prompt for one outbound message until a valid-length one is
    /// entered. An oversized message is discarded, never truncated.
    ///
    /// Returns the raw accepted input; the quit directive and the empty
    /// message both come back as-is for the caller to act on.
    pub async fn prompt_message(&mut self, name: &str) -> io::Result<String> {
        loop {
            self.write_prompt(&format!("{name}{}", protocol::SEPARATOR)).await?;
            let text = self.read_trimmed_line().await?;
            match protocol::validate_message(&text) {
                Ok(()) => return Ok(text),
                Err(e) => self.notify(&e.to_string()).await?,
            }
        }
    }

    /// Display inbound chat text exactly as received, with no prefix.
    /// The sender already framed it with their own name.
    pub async fn show_inbound(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Print an informational line to the operator.
    pub async fn notify(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// A prompt stays on the same line as the operator's input.
    async fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await
    }

    /// Read one input line with the trailing newline stripped.
    ///
    /// A zero-byte read means the console input was closed and
    /// surfaces as `UnexpectedEof` rather than an empty line.
    async fn read_trimmed_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "console input closed",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

#[cfg(test)]
impl<R, W> Console<R, W> {
    /// Consume the console and hand back its output sink.
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(input: &'static [u8]) -> Console<&'static [u8], Vec<u8>> {
        Console::new(input, Vec::new())
    }

    #[tokio::test]
    async fn test_prompt_name_accepts_valid() {
        let mut console = scripted(b"alice\n");
        assert_eq!(console.prompt_name().await.unwrap(), "alice");
        let out = String::from_utf8(console.output).unwrap();
        assert!(out.contains("Please enter your name"));
    }

    #[tokio::test]
    async fn test_prompt_name_reprompts_on_bad_lengths() {
        // Empty, then 11 chars, then a valid 10-char name
        let mut console = scripted(b"\nabcdefghijk\nabcdefghij\n");
        assert_eq!(console.prompt_name().await.unwrap(), "abcdefghij");
        let out = String::from_utf8(console.output).unwrap();
        assert_eq!(out.matches("valid name").count(), 2);
    }

    #[tokio::test]
    async fn test_prompt_name_strips_crlf() {
        let mut console = scripted(b"bob\r\n");
        assert_eq!(console.prompt_name().await.unwrap(), "bob");
    }

    #[tokio::test]
    async fn test_prompt_message_reprompts_on_oversize() {
        let mut input = "x".repeat(501).into_bytes();
        input.extend_from_slice(b"\nhello\n");
        let mut console = Console::new(&input[..], Vec::new());
        assert_eq!(console.prompt_message("op").await.unwrap(), "hello");
        let out = String::from_utf8(console.output).unwrap();
        assert!(out.contains("Message was not sent"));
        // Prompt carries the operator handle and separator
        assert!(out.contains("op> "));
    }

    #[tokio::test]
    async fn test_prompt_message_allows_empty() {
        let mut console = scripted(b"\n");
        assert_eq!(console.prompt_message("op").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_prompt_message_returns_quit_raw() {
        let mut console = scripted(b"\\quit\n");
        assert_eq!(console.prompt_message("op").await.unwrap(), "\\quit");
    }

    #[tokio::test]
    async fn test_closed_input_is_unexpected_eof() {
        let mut console = scripted(b"");
        let err = console.prompt_name().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn test_show_inbound_is_verbatim() {
        let mut console = scripted(b"");
        console.show_inbound("hello").await.unwrap();
        assert_eq!(console.output, b"hello\n");
    }
}
