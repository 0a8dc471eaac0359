//! Type-safe builders for NETCONF event-notification subscriptions
//!
//! Three subscription requests are supported:
//!
//! - `create-subscription` (RFC 5277)
//! - `establish-subscription` (RFC 8639, with RFC 8641 yang-push controls)
//! - `delete-subscription` (RFC 8639)
//!
//! Each request is a plain struct. Building one yields an `xmltree::Element`
//! holding the operation document, ready to be wrapped in an `<rpc>` by a
//! session. The builders never perform I/O.
//!
//! ```rust
//! use netconf_api::operations::{build_establish_subscription, EstablishSubscriptionRequest};
//!
//! let request = EstablishSubscriptionRequest::new()
//!     .with_stream("NETCONF")
//!     .with_period(500);
//! let document = build_establish_subscription(&request)?;
//! assert_eq!(document.name, "establish-subscription");
//! # Ok::<(), netconf_api::operation::ValidationError>(())
//! ```
//!
//! To submit requests, wrap a `netconf_transport::Session` (or any other
//! `Transport`) in a `NetconfClient`:
//!
//! ```rust,ignore
//! use netconf_api::{NetconfClient, operations::DeleteSubscriptionRequest};
//!
//! let client = NetconfClient::new(Session::new(stream));
//! let reply = client.delete_subscription(DeleteSubscriptionRequest::new("42"))?;
//! ```

pub mod capability;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod operation;
pub mod operations;
pub mod xml;

pub use capability::Capabilities;
pub use client::NetconfClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use filter::{build_filter, FilterSpec};
pub use operation::{
    NetconfOperation, OperationBuilder, PreparedOperation, Validate, ValidationError,
    ValidationLevel,
};
pub use operations::{
    build_create_subscription, build_delete_subscription, build_establish_subscription,
    CreateSubscriptionOperation, CreateSubscriptionRequest, DeleteSubscriptionOperation,
    DeleteSubscriptionRequest, EstablishSubscriptionOperation, EstablishSubscriptionRequest,
};

pub use netconf_transport::{RpcReply, Session, SessionConfig, Transport, TransportError};
