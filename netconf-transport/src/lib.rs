//! Private NETCONF session layer
//!
//! This crate provides the minimal session machinery needed to submit
//! operation documents to a NETCONF server: RFC 6242 message framing, the
//! `<rpc>` envelope with a per-session `message-id`, and correlation of the
//! `<rpc-reply>` with the request that produced it. Replies are returned as
//! parsed elements and never interpreted here.

mod config;
mod error;
pub mod framing;
mod session;

pub use config::SessionConfig;
pub use error::TransportError;
pub use framing::Framing;
pub use session::{wrap_rpc, RpcReply, Session, Transport};

/// NETCONF base namespace used by the `<rpc>` envelope and `<filter>` elements
pub const BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";
