//! Event-notification subscription operations
//!
//! Builders for the three subscription requests:
//! - `create-subscription` in the RFC 5277 notification namespace
//! - `establish-subscription` in the subscribed-notifications namespace, with
//!   yang-push controls under the `yp` prefix
//! - `delete-subscription` in the subscribed-notifications namespace
//!
//! The `build_*` functions are pure: they return the operation document and
//! never touch a session.

mod create_subscription;
mod delete_subscription;
mod establish_subscription;

pub use create_subscription::*;
pub use delete_subscription::*;
pub use establish_subscription::*;

use xmltree::Element;

use crate::operation::{NetconfOperation, ValidationError};

/// Build a `create-subscription` document
pub fn build_create_subscription(
    request: &CreateSubscriptionRequest,
) -> Result<Element, ValidationError> {
    CreateSubscriptionOperation::build_request(request)
}

/// Build an `establish-subscription` document
pub fn build_establish_subscription(
    request: &EstablishSubscriptionRequest,
) -> Result<Element, ValidationError> {
    EstablishSubscriptionOperation::build_request(request)
}

/// Build a `delete-subscription` document
pub fn build_delete_subscription(
    request: &DeleteSubscriptionRequest,
) -> Result<Element, ValidationError> {
    DeleteSubscriptionOperation::build_request(request)
}
