//! Session configuration

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::framing::Framing;

/// Configuration for a NETCONF `Session`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Framing used for every message on the session
    /// Default: end-of-message (base:1.0)
    pub framing: Framing,

    /// message-id assigned to the first rpc
    /// Default: 101
    pub initial_message_id: u64,

    /// Largest reply accepted before the read is aborted
    /// Default: 16 MiB
    pub max_message_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            framing: Framing::EndOfMessage,
            initial_message_id: 101,
            max_message_size: 16 * 1024 * 1024,
        }
    }
}

impl SessionConfig {
    /// Create a new SessionConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a session where both peers negotiated base:1.1
    pub fn base_1_1() -> Self {
        Self {
            framing: Framing::Chunked,
            ..Default::default()
        }
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_initial_message_id(mut self, message_id: u64) -> Self {
        self.initial_message_id = message_id;
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.max_message_size == 0 {
            return Err(TransportError::Configuration(
                "Max message size must be greater than 0".to_string(),
            ));
        }

        if self.initial_message_id == 0 {
            return Err(TransportError::Configuration(
                "Initial message-id must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
