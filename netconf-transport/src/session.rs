//! NETCONF session over any byte stream
//!
//! A `Session` owns a connected stream (the stdio of an `ssh -s netconf`
//! subsystem, a TLS stream, a test double) and exchanges one framed `<rpc>`
//! per request, matching the reply by `message-id`.

use std::io::{BufReader, Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use xmltree::{Element, EmitterConfig, Namespace, XMLNode};

use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::framing::{read_message, write_message};
use crate::BASE_NS;

/// The collaborator surface a request builder needs from the session layer
///
/// Implementations send the document, wait for the correlated reply and hand
/// it back. The reply type is left to the implementation so callers stay
/// decoupled from reply interpretation.
pub trait Transport {
    /// What a successful exchange returns
    type Reply;

    /// Send an operation document and wait for its reply
    fn submit_request(&self, document: &Element) -> Result<Self::Reply, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Reply = T::Reply;

    fn submit_request(&self, document: &Element) -> Result<Self::Reply, TransportError> {
        (**self).submit_request(document)
    }
}

/// A reply correlated to the rpc that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
    /// message-id shared by the request and this reply
    pub message_id: String,
    /// The complete `<rpc-reply>` element, uninterpreted
    pub document: Element,
}

/// A NETCONF session bound to a connected stream
pub struct Session<S: Read + Write> {
    stream: Mutex<BufReader<S>>,
    next_message_id: AtomicU64,
    config: SessionConfig,
}

impl<S: Read + Write> Session<S> {
    /// Create a session with default configuration (base:1.0 framing)
    pub fn new(stream: S) -> Self {
        Self {
            stream: Mutex::new(BufReader::new(stream)),
            next_message_id: AtomicU64::new(SessionConfig::default().initial_message_id),
            config: SessionConfig::default(),
        }
    }

    /// Create a session with custom configuration
    pub fn with_config(stream: S, config: SessionConfig) -> Result<Self, TransportError> {
        config.validate()?;
        Ok(Self {
            stream: Mutex::new(BufReader::new(stream)),
            next_message_id: AtomicU64::new(config.initial_message_id),
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> S {
        self.stream.into_inner().into_inner()
    }

    fn allocate_message_id(&self) -> String {
        self.next_message_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    fn exchange(&self, message_id: &str, document: &Element) -> Result<RpcReply, TransportError> {
        let payload = serialize(&wrap_rpc(message_id, document))?;

        // Hold the stream for the whole exchange so replies cannot interleave
        let mut stream = self.stream.lock();
        write_message(stream.get_mut(), self.config.framing, &payload)?;
        let raw = read_message(&mut *stream, self.config.framing, self.config.max_message_size)?;
        drop(stream);

        let reply = Element::parse(raw.as_slice())
            .map_err(|e| TransportError::Parse(e.to_string()))?;
        correlate(message_id, reply)
    }
}

impl<S: Read + Write> Transport for Session<S> {
    type Reply = RpcReply;

    fn submit_request(&self, document: &Element) -> Result<RpcReply, TransportError> {
        let message_id = self.allocate_message_id();
        tracing::debug!(
            message_id = %message_id,
            operation = %document.name,
            "Submitting rpc"
        );

        let result = self.exchange(&message_id, document);
        match &result {
            Ok(_) => tracing::debug!(message_id = %message_id, "Received rpc-reply"),
            Err(e) => tracing::warn!(message_id = %message_id, "rpc exchange failed: {}", e),
        }
        result
    }
}

/// Wrap an operation document in an `<rpc>` envelope
pub fn wrap_rpc(message_id: &str, document: &Element) -> Element {
    let mut namespaces = Namespace::empty();
    namespaces.put("", BASE_NS);

    let mut rpc = Element::new("rpc");
    rpc.namespace = Some(BASE_NS.to_string());
    rpc.namespaces = Some(namespaces);
    rpc.attributes
        .insert("message-id".to_string(), message_id.to_string());
    rpc.children.push(XMLNode::Element(document.clone()));
    rpc
}

fn serialize(element: &Element) -> Result<Vec<u8>, TransportError> {
    let mut buf = Vec::new();
    element
        .write_with_config(
            &mut buf,
            EmitterConfig::new().write_document_declaration(false),
        )
        .map_err(|e| TransportError::Parse(e.to_string()))?;
    Ok(buf)
}

fn correlate(expected: &str, reply: Element) -> Result<RpcReply, TransportError> {
    if reply.name != "rpc-reply" {
        return Err(TransportError::Parse(format!(
            "Expected rpc-reply, found {}",
            reply.name
        )));
    }

    match reply.attributes.get("message-id") {
        Some(found) if found == expected => Ok(RpcReply {
            message_id: found.clone(),
            document: reply,
        }),
        found => Err(TransportError::MessageIdMismatch {
            expected: expected.to_string(),
            found: found.cloned(),
        }),
    }
}
