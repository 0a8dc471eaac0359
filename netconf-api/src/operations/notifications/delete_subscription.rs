//! `delete-subscription` (RFC 8639)

use xmltree::Element;

use crate::capability;
use crate::operation::{NetconfOperation, Validate, ValidationError};
use crate::xml::{self, IETF_NOTIFICATION_NS, SUBSCRIBED_NOTIFICATIONS};

/// Delete a dynamic subscription
pub struct DeleteSubscriptionOperation;

/// Request for `delete-subscription`
///
/// A request without an identifier still builds: the document is sent with
/// no `subscription-id` and the server rejects it. Comprehensive validation
/// catches this locally instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSubscriptionRequest {
    pub subscription_id: Option<String>,
}

impl DeleteSubscriptionRequest {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: Some(subscription_id.into()),
        }
    }
}

impl Validate for DeleteSubscriptionRequest {
    fn validate_comprehensive(&self) -> Result<(), ValidationError> {
        self.validate_boundary()?;

        match &self.subscription_id {
            None => Err(ValidationError::missing("subscription_id")),
            Some(id) => id.parse::<u32>().map(|_| ()).map_err(|_| {
                ValidationError::invalid_value(
                    "subscription_id",
                    id,
                    "subscription identifiers are unsigned 32-bit integers",
                )
            }),
        }
    }
}

impl NetconfOperation for DeleteSubscriptionOperation {
    type Request = DeleteSubscriptionRequest;

    const NAME: &'static str = "delete-subscription";
    const NAMESPACE: &'static str = IETF_NOTIFICATION_NS;

    fn dependencies() -> &'static [&'static str] {
        &[capability::NOTIFICATION]
    }

    fn build_request(request: &Self::Request) -> Result<Element, ValidationError> {
        let mut node = xml::new_element_ns(Self::NAME, &SUBSCRIBED_NOTIFICATIONS);

        match &request.subscription_id {
            Some(id) => {
                xml::text_element(&mut node, "subscription-id", &SUBSCRIBED_NOTIFICATIONS, id.as_str())
            }
            None => tracing::warn!("delete-subscription built without a subscription-id"),
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::ValidationLevel;
    use crate::xml::child_elements;

    #[test]
    fn test_subscription_id_child() {
        let node =
            DeleteSubscriptionOperation::build_request(&DeleteSubscriptionRequest::new("42"))
                .unwrap();
        assert_eq!(node.name, "delete-subscription");
        assert_eq!(node.namespace.as_deref(), Some(IETF_NOTIFICATION_NS));

        let children: Vec<&Element> = child_elements(&node).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "subscription-id");
        assert_eq!(children[0].namespace.as_deref(), Some(IETF_NOTIFICATION_NS));
        assert_eq!(children[0].get_text().as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_id_builds_empty_document() {
        let node =
            DeleteSubscriptionOperation::build_request(&DeleteSubscriptionRequest::default())
                .unwrap();
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_missing_id_rejected_by_comprehensive_validation() {
        let request = DeleteSubscriptionRequest::default();
        assert!(request.validate(ValidationLevel::Boundary).is_ok());
        assert_eq!(
            request.validate(ValidationLevel::Comprehensive),
            Err(ValidationError::missing("subscription_id"))
        );
    }

    #[test]
    fn test_non_numeric_id() {
        let request = DeleteSubscriptionRequest::new("sub-1");
        assert!(request.validate(ValidationLevel::Boundary).is_ok());
        assert!(request.validate(ValidationLevel::Comprehensive).is_err());
        assert!(DeleteSubscriptionRequest::new("42")
            .validate(ValidationLevel::Comprehensive)
            .is_ok());
    }
}
