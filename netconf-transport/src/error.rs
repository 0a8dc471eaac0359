//! Error types for the NETCONF session layer

use thiserror::Error;

/// Errors that can occur while exchanging messages with a NETCONF server
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O failure on the underlying stream
    #[error("I/O error: {0}")]
    Io(String),

    /// The byte stream did not follow the negotiated message framing
    #[error("Framing error: {0}")]
    Framing(String),

    /// XML parsing or serialization error
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// The reply did not carry the message-id of the request it answers
    #[error("Reply message-id mismatch: expected {expected}, found {found:?}")]
    MessageIdMismatch {
        expected: String,
        found: Option<String>,
    },

    /// The peer closed the stream before a complete message arrived
    #[error("Session closed by peer")]
    SessionClosed,

    /// Invalid session configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<std::io::Error> for TransportError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => TransportError::SessionClosed,
            _ => TransportError::Io(error.to_string()),
        }
    }
}
