//! Filter element construction
//!
//! Turns a filter specification into a `<filter>` element in the NETCONF base
//! namespace, ready to attach to an operation document.

use xmltree::Element;

use crate::capability;
use crate::operation::ValidationError;
use crate::xml::{self, BASE_NS, NETCONF_BASE, NETCONF_NOTIFICATION_NS};

/// What a filter selects and how
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Subtree criteria given as XML text, e.g. `<interfaces xmlns="..."/>`
    Subtree(String),
    /// Subtree criteria already parsed into elements
    SubtreeElements(Vec<Element>),
    /// XPath expression with the prefix declarations it refers to
    XPath {
        select: String,
        namespaces: Vec<(String, String)>,
    },
    /// A complete `<filter>` element, used as-is
    Element(Element),
}

impl FilterSpec {
    pub fn subtree(criteria: impl Into<String>) -> Self {
        FilterSpec::Subtree(criteria.into())
    }

    pub fn xpath(select: impl Into<String>) -> Self {
        FilterSpec::XPath {
            select: select.into(),
            namespaces: Vec::new(),
        }
    }

    /// XPath filter whose expression uses prefixes bound by `namespaces`
    pub fn xpath_with_namespaces<P, U>(
        select: impl Into<String>,
        namespaces: impl IntoIterator<Item = (P, U)>,
    ) -> Self
    where
        P: Into<String>,
        U: Into<String>,
    {
        FilterSpec::XPath {
            select: select.into(),
            namespaces: namespaces
                .into_iter()
                .map(|(prefix, uri)| (prefix.into(), uri.into()))
                .collect(),
        }
    }

    /// The filter `type` attribute this spec produces, if known
    pub fn filter_type(&self) -> Option<&str> {
        match self {
            FilterSpec::Subtree(_) | FilterSpec::SubtreeElements(_) => Some("subtree"),
            FilterSpec::XPath { .. } => Some("xpath"),
            FilterSpec::Element(element) => element.attributes.get("type").map(String::as_str),
        }
    }

    /// Capabilities the server needs to evaluate this filter
    pub fn required_capabilities(&self) -> &'static [&'static str] {
        match self.filter_type() {
            Some("xpath") => &[capability::XPATH],
            _ => &[],
        }
    }
}

/// Build a `<filter>` element from `spec`
pub fn build_filter(spec: &FilterSpec) -> Result<Element, ValidationError> {
    build_filter_for("filter", spec)
}

/// Build a `<filter>` element, reporting failures against `parameter`
pub(crate) fn build_filter_for(
    parameter: &str,
    spec: &FilterSpec,
) -> Result<Element, ValidationError> {
    match spec {
        FilterSpec::Subtree(criteria) => {
            let criteria = xml::parse_element(criteria).map_err(|e| {
                ValidationError::invalid_value(parameter, criteria, e)
            })?;
            Ok(subtree_filter(vec![criteria]))
        }
        FilterSpec::SubtreeElements(criteria) => Ok(subtree_filter(criteria.clone())),
        FilterSpec::XPath { select, namespaces } => {
            if select.trim().is_empty() {
                return Err(ValidationError::invalid_value(
                    parameter,
                    select,
                    "XPath select expression is empty",
                ));
            }

            let mut filter = xml::new_element_ns("filter", &NETCONF_BASE);
            if let Some(declared) = filter.namespaces.as_mut() {
                for (prefix, uri) in namespaces {
                    declared.put(prefix.as_str(), uri.as_str());
                }
            }
            filter
                .attributes
                .insert("type".to_string(), "xpath".to_string());
            filter
                .attributes
                .insert("select".to_string(), select.clone());
            Ok(filter)
        }
        FilterSpec::Element(element) => {
            let namespace_ok = match element.namespace.as_deref() {
                None => true,
                Some(ns) => ns == BASE_NS || ns == NETCONF_NOTIFICATION_NS,
            };
            if element.name != "filter" || !namespace_ok {
                return Err(ValidationError::invalid_value(
                    parameter,
                    &element.name,
                    "pre-built filter must be a <filter> element",
                ));
            }
            Ok(element.clone())
        }
    }
}

fn subtree_filter(criteria: Vec<Element>) -> Element {
    let mut filter = xml::new_element_ns("filter", &NETCONF_BASE);
    filter
        .attributes
        .insert("type".to_string(), "subtree".to_string());
    for element in criteria {
        xml::append(&mut filter, element);
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{child_elements, to_xml_string};

    #[test]
    fn test_subtree_filter_from_text() {
        let spec = FilterSpec::subtree(r#"<interfaces xmlns="urn:example:if"/>"#);
        let filter = build_filter(&spec).unwrap();

        assert_eq!(filter.name, "filter");
        assert_eq!(filter.namespace.as_deref(), Some(BASE_NS));
        assert_eq!(filter.attributes.get("type").map(String::as_str), Some("subtree"));

        let criteria: Vec<&Element> = child_elements(&filter).collect();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].name, "interfaces");
        assert_eq!(criteria[0].namespace.as_deref(), Some("urn:example:if"));
    }

    #[test]
    fn test_subtree_filter_from_elements_keeps_order() {
        let first = Element::new("first");
        let second = Element::new("second");
        let filter = build_filter(&FilterSpec::SubtreeElements(vec![first, second])).unwrap();

        let names: Vec<&str> = child_elements(&filter).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_invalid_subtree_text() {
        let result = build_filter(&FilterSpec::subtree("<unclosed>"));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidValue { ref parameter, .. }) if parameter == "filter"
        ));
    }

    #[test]
    fn test_xpath_filter() {
        let spec = FilterSpec::xpath_with_namespaces(
            "/if:interfaces/if:interface",
            [("if", "urn:ietf:params:xml:ns:yang:ietf-interfaces")],
        );
        let filter = build_filter(&spec).unwrap();

        assert_eq!(filter.attributes.get("type").map(String::as_str), Some("xpath"));
        assert_eq!(
            filter.attributes.get("select").map(String::as_str),
            Some("/if:interfaces/if:interface")
        );
        assert!(filter.children.is_empty());

        let xml = to_xml_string(&filter).unwrap();
        assert!(xml.contains(r#"xmlns:if="urn:ietf:params:xml:ns:yang:ietf-interfaces""#));
    }

    #[test]
    fn test_empty_xpath_rejected() {
        assert!(build_filter(&FilterSpec::xpath("  ")).is_err());
    }

    #[test]
    fn test_prebuilt_filter_element() {
        let element = xml::parse_element(
            r#"<filter xmlns="urn:ietf:params:xml:ns:netconf:notification:1.0" type="subtree"><event/></filter>"#,
        )
        .unwrap();
        let spec = FilterSpec::Element(element.clone());

        assert_eq!(build_filter(&spec).unwrap(), element);
        assert_eq!(spec.filter_type(), Some("subtree"));
    }

    #[test]
    fn test_prebuilt_element_must_be_filter() {
        let spec = FilterSpec::Element(Element::new("interfaces"));
        assert!(build_filter(&spec).is_err());

        let foreign = xml::parse_element(r#"<filter xmlns="urn:example:other"/>"#).unwrap();
        assert!(build_filter(&FilterSpec::Element(foreign)).is_err());
    }

    #[test]
    fn test_required_capabilities() {
        assert_eq!(FilterSpec::xpath("/a").required_capabilities(), &[capability::XPATH]);
        assert!(FilterSpec::subtree("<a/>").required_capabilities().is_empty());
    }
}
