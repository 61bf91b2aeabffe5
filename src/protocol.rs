//! Chat wire protocol: frame construction and input validation.
//!
//! The protocol is deliberately minimal: plain UTF-8 text over a stream
//! socket, one send/receive call per message, no length prefix and no
//! delimiter beyond what the transport provides. An outbound frame is
//! `"{name}> {text}"`; inbound frames are displayed exactly as received.

use bytes::{Bytes, BytesMut};

/// Maximum outbound message length, in characters.
pub const MAX_CHAT_CHARS: usize = 500;

/// Maximum operator name length, in characters.
pub const MAX_NAME_CHARS: usize = 10;

/// Receive buffer size: a full message plus the sender's name prefix.
/// This is the de facto maximum inbound frame size.
pub const RECV_BUFFER_BYTES: usize = MAX_CHAT_CHARS + MAX_NAME_CHARS + 2;

/// Literal separator between the sender name and the message text.
pub const SEPARATOR: &str = "> ";

/// Reserved input token that ends a session from the operator's side.
/// Checked for exact match against the raw input; never transmitted.
pub const QUIT_DIRECTIVE: &str = "\\quit";

/// Build the outbound frame `"{name}> {text}"`.
///
/// The caller is expected to have validated both parts; framing itself
/// never fails.
pub fn frame(name: &str, text: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(name.len() + SEPARATOR.len() + text.len());
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(SEPARATOR.as_bytes());
    buf.extend_from_slice(text.as_bytes());
    buf.freeze()
}

/// Check whether raw operator input is the quit directive.
pub fn is_quit(input: &str) -> bool {
    input == QUIT_DIRECTIVE
}

/// Validate an operator name: 1 to [`MAX_NAME_CHARS`] characters.
pub fn validate_name(name: &str) -> Result<(), InputError> {
    let len = name.chars().count();
    if len == 0 {
        Err(InputError::EmptyName)
    } else if len > MAX_NAME_CHARS {
        Err(InputError::NameTooLong)
    } else {
        Ok(())
    }
}

/// Validate an outbound message: 0 to [`MAX_CHAT_CHARS`] characters.
///
/// The empty message is legal to send. Lengths are counted in characters
/// to match what the operator typed, not in encoded bytes.
pub fn validate_message(text: &str) -> Result<(), InputError> {
    if text.chars().count() > MAX_CHAT_CHARS {
        Err(InputError::MessageTooLong)
    } else {
        Ok(())
    }
}

/// Operator input validation errors.
///
/// These are recoverable: the offending input is discarded and the
/// operator is re-prompted. Nothing is ever truncated or sent anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    EmptyName,
    NameTooLong,
    MessageTooLong,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::EmptyName | InputError::NameTooLong => {
                write!(f, "Please enter a valid name (1-{MAX_NAME_CHARS} characters).")
            }
            InputError::MessageTooLong => {
                write!(
                    f,
                    "Message exceeds the maximum length of {MAX_CHAT_CHARS} characters. \
                     Message was not sent."
                )
            }
        }
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_shape() {
        assert_eq!(&frame("alice", "hello")[..], b"alice> hello");
    }

    #[test]
    fn test_frame_empty_message() {
        // Zero-length messages are legal and still carry the name prefix
        assert_eq!(&frame("bob", "")[..], b"bob> ");
    }

    #[test]
    fn test_frame_max_lengths() {
        let name = "a".repeat(MAX_NAME_CHARS);
        let text = "x".repeat(MAX_CHAT_CHARS);
        let framed = frame(&name, &text);
        assert_eq!(framed.len(), RECV_BUFFER_BYTES);
        assert!(framed.starts_with(name.as_bytes()));
        assert_eq!(&framed[MAX_NAME_CHARS..MAX_NAME_CHARS + 2], b"> ");
    }

    #[test]
    fn test_validate_name_bounds() {
        assert_eq!(validate_name(""), Err(InputError::EmptyName));
        assert_eq!(validate_name("a"), Ok(()));
        assert_eq!(validate_name(&"n".repeat(10)), Ok(()));
        assert_eq!(validate_name(&"n".repeat(11)), Err(InputError::NameTooLong));
    }

    #[test]
    fn test_validate_message_bounds() {
        assert_eq!(validate_message(""), Ok(()));
        assert_eq!(validate_message(&"m".repeat(500)), Ok(()));
        assert_eq!(
            validate_message(&"m".repeat(501)),
            Err(InputError::MessageTooLong)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 500 multibyte characters are within the limit even though the
        // encoded form exceeds 500 bytes
        let text = "é".repeat(500);
        assert!(text.len() > 500);
        assert_eq!(validate_message(&text), Ok(()));
    }

    #[test]
    fn test_quit_exact_match_only() {
        assert!(is_quit("\\quit"));
        assert!(!is_quit("\\quit "));
        assert!(!is_quit(" \\quit"));
        assert!(!is_quit("\\QUIT"));
        assert!(!is_quit("quit"));
    }
}
