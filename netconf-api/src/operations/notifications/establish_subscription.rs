//! `establish-subscription` (RFC 8639, with RFC 8641 yang-push controls)

use xmltree::Element;

use crate::capability;
use crate::filter::{build_filter_for, FilterSpec};
use crate::operation::{NetconfOperation, Validate, ValidationError};
use crate::xml::{self, IETF_NOTIFICATION_NS, SUBSCRIBED_NOTIFICATIONS_WITH_PUSH};

/// Dynamic (push) subscription
pub struct EstablishSubscriptionOperation;

/// Request for `establish-subscription`
///
/// `filter`, `subtree_filter` and `xpath_filter` are three independent ways
/// of narrowing the subscription. Any combination is written to the document;
/// only comprehensive validation insists on at most one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstablishSubscriptionRequest {
    /// Event stream name
    pub stream: Option<String>,
    /// Encoding identity, e.g. `encode-xml`
    pub encoding: Option<String>,
    /// Pre-built filter fragment attached verbatim
    pub filter: Option<Element>,
    /// Filter specification passed through the filter builder
    pub subtree_filter: Option<FilterSpec>,
    /// XPath expression written as `yp:xpath-filter`
    pub xpath_filter: Option<String>,
    /// Periodic update interval in centiseconds
    pub period: Option<u32>,
    /// Skip the initial full update of an on-change subscription.
    /// `no-synch-on-start` is an empty leaf, so `false` writes nothing.
    pub no_synch_on_start: bool,
    /// On-change dampening interval in centiseconds
    pub dampening_period: Option<u32>,
}

impl EstablishSubscriptionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_filter(mut self, filter: Element) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_subtree_filter(mut self, spec: FilterSpec) -> Self {
        self.subtree_filter = Some(spec);
        self
    }

    pub fn with_xpath_filter(mut self, select: impl Into<String>) -> Self {
        self.xpath_filter = Some(select.into());
        self
    }

    pub fn with_period(mut self, period: u32) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_no_synch_on_start(mut self, no_synch_on_start: bool) -> Self {
        self.no_synch_on_start = no_synch_on_start;
        self
    }

    pub fn with_dampening_period(mut self, dampening_period: u32) -> Self {
        self.dampening_period = Some(dampening_period);
        self
    }

    /// Names of the filter mechanisms supplied, in document order
    pub fn filter_mechanisms(&self) -> Vec<&'static str> {
        let mut supplied = Vec::new();
        if self.filter.is_some() {
            supplied.push("filter");
        }
        if self.subtree_filter.is_some() {
            supplied.push("subtree_filter");
        }
        if self.xpath_filter.is_some() {
            supplied.push("xpath_filter");
        }
        supplied
    }
}

impl Validate for EstablishSubscriptionRequest {
    fn validate_comprehensive(&self) -> Result<(), ValidationError> {
        self.validate_boundary()?;

        let mechanisms = self.filter_mechanisms();
        if mechanisms.len() > 1 {
            return Err(ValidationError::conflicting(&mechanisms));
        }

        if self.period == Some(0) {
            return Err(ValidationError::range_error("period", 1, u32::MAX, 0));
        }

        // period selects periodic updates; dampening and no-synch belong to on-change
        if self.period.is_some() && self.dampening_period.is_some() {
            return Err(ValidationError::conflicting(&["period", "dampening_period"]));
        }
        if self.period.is_some() && self.no_synch_on_start {
            return Err(ValidationError::conflicting(&["period", "no_synch_on_start"]));
        }

        Ok(())
    }
}

impl NetconfOperation for EstablishSubscriptionOperation {
    type Request = EstablishSubscriptionRequest;

    const NAME: &'static str = "establish-subscription";
    const NAMESPACE: &'static str = IETF_NOTIFICATION_NS;

    fn dependencies() -> &'static [&'static str] {
        &[capability::NOTIFICATION]
    }

    fn build_request(request: &Self::Request) -> Result<Element, ValidationError> {
        let ns = &SUBSCRIBED_NOTIFICATIONS_WITH_PUSH;
        let mut node = ns.root(Self::NAME);

        let mechanisms = request.filter_mechanisms();
        if mechanisms.len() > 1 {
            tracing::warn!(
                "establish-subscription combines filter mechanisms {:?}; all are sent",
                mechanisms
            );
        }

        if let Some(stream) = &request.stream {
            ns.base_text(&mut node, "stream", stream.as_str());
        }
        if let Some(encoding) = &request.encoding {
            ns.base_text(&mut node, "encoding", encoding.as_str());
        }
        if let Some(filter) = &request.filter {
            xml::append(&mut node, filter.clone());
        }
        if let Some(spec) = &request.subtree_filter {
            xml::append(&mut node, build_filter_for("subtree_filter", spec)?);
        }
        if let Some(select) = &request.xpath_filter {
            ns.extension_text(&mut node, "xpath-filter", select.as_str());
        }
        if let Some(period) = request.period {
            ns.extension_text(&mut node, "period", period.to_string());
        }
        if request.no_synch_on_start {
            ns.extension_marker(&mut node, "no-synch-on-start");
        }
        if let Some(dampening_period) = request.dampening_period {
            ns.extension_text(&mut node, "dampening-period", dampening_period.to_string());
        }

        Ok(node)
    }

    fn required_capabilities(request: &Self::Request) -> Vec<&'static str> {
        let mut required = Self::dependencies().to_vec();
        let filter_types = request
            .filter
            .as_ref()
            .and_then(|filter| filter.attributes.get("type"))
            .map(String::as_str)
            .into_iter()
            .chain(request.subtree_filter.as_ref().and_then(FilterSpec::filter_type));
        for filter_type in filter_types {
            if filter_type == "xpath" && !required.contains(&capability::XPATH) {
                required.push(capability::XPATH);
            }
        }
        required
    }
}
