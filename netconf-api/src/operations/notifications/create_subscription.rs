//! `create-subscription` (RFC 5277)

use chrono::{DateTime, FixedOffset};
use xmltree::Element;

use crate::capability;
use crate::filter::{build_filter_for, FilterSpec};
use crate::operation::{NetconfOperation, Validate, ValidationError};
use crate::xml::{self, NETCONF_NOTIFICATION, NETCONF_NOTIFICATION_NS};

/// Legacy notification subscription
pub struct CreateSubscriptionOperation;

/// Request for `create-subscription`
///
/// Every field is optional; an absent field produces no element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSubscriptionRequest {
    /// Which notifications to receive; all of them when absent
    pub filter: Option<FilterSpec>,
    /// Stream to subscribe to; the server's default stream when absent
    pub stream_name: Option<String>,
    /// RFC 3339 time to start replaying from
    pub start_time: Option<String>,
    /// RFC 3339 time to stop at; only valid together with `start_time`
    pub stop_time: Option<String>,
}

impl CreateSubscriptionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_stream(mut self, stream_name: impl Into<String>) -> Self {
        self.stream_name = Some(stream_name.into());
        self
    }

    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn with_stop_time(mut self, stop_time: impl Into<String>) -> Self {
        self.stop_time = Some(stop_time.into());
        self
    }

    fn check_time_dependency(&self) -> Result<(), ValidationError> {
        if self.stop_time.is_some() && self.start_time.is_none() {
            return Err(ValidationError::dependent("stop_time", "start_time"));
        }
        Ok(())
    }
}

fn parse_time(parameter: &str, value: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| ValidationError::invalid_value(parameter, value, format!("not an RFC 3339 date-time: {}", e)))
}

impl Validate for CreateSubscriptionRequest {
    fn validate_boundary(&self) -> Result<(), ValidationError> {
        self.check_time_dependency()
    }

    fn validate_comprehensive(&self) -> Result<(), ValidationError> {
        self.validate_boundary()?;

        let start = self
            .start_time
            .as_deref()
            .map(|value| parse_time("start_time", value))
            .transpose()?;
        let stop = self
            .stop_time
            .as_deref()
            .map(|value| parse_time("stop_time", value))
            .transpose()?;

        if let (Some(start), Some(stop)) = (start, stop) {
            if stop < start {
                return Err(ValidationError::Custom {
                    parameter: "stop_time".to_string(),
                    message: "stop_time must not be earlier than start_time".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl NetconfOperation for CreateSubscriptionOperation {
    type Request = CreateSubscriptionRequest;

    const NAME: &'static str = "create-subscription";
    const NAMESPACE: &'static str = NETCONF_NOTIFICATION_NS;

    fn dependencies() -> &'static [&'static str] {
        &[capability::NOTIFICATION]
    }

    fn build_request(request: &Self::Request) -> Result<Element, ValidationError> {
        request.check_time_dependency()?;

        let mut node = xml::new_element_ns(Self::NAME, &NETCONF_NOTIFICATION);

        if let Some(filter) = &request.filter {
            xml::append(&mut node, build_filter_for("filter", filter)?);
        }
        if let Some(stream_name) = &request.stream_name {
            xml::text_element(&mut node, "stream", &NETCONF_NOTIFICATION, stream_name.as_str());
        }
        if let Some(start_time) = &request.start_time {
            xml::text_element(&mut node, "startTime", &NETCONF_NOTIFICATION, start_time.as_str());
        }
        if let Some(stop_time) = &request.stop_time {
            xml::text_element(&mut node, "stopTime", &NETCONF_NOTIFICATION, stop_time.as_str());
        }

        Ok(node)
    }

    fn required_capabilities(request: &Self::Request) -> Vec<&'static str> {
        let mut required = Self::dependencies().to_vec();
        if let Some(filter) = &request.filter {
            required.extend_from_slice(filter.required_capabilities());
        }
        required
    }
}
