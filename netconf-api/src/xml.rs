//! XML construction primitives for request documents
//!
//! Thin helpers over `xmltree` for creating namespaced elements, attaching
//! text-bearing, presence-only and pre-built children, and serializing a
//! finished document. Every child-construction call takes the namespace it
//! belongs to explicitly; nothing here relies on an ambient default.

use xmltree::{Element, EmitterConfig, Namespace, XMLNode};

use crate::error::{ApiError, Result};

/// NETCONF base namespace
pub const BASE_NS: &str = netconf_transport::BASE_NS;

/// RFC 5277 notification namespace used by `create-subscription`
pub const NETCONF_NOTIFICATION_NS: &str = "urn:ietf:params:xml:ns:netconf:notification:1.0";

/// RFC 8639 subscribed-notifications namespace
pub const IETF_NOTIFICATION_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-subscribed-notifications";

/// RFC 8641 yang-push namespace
pub const IETF_PUSH_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-yang-push";

/// An XML namespace together with the prefix it is written with
///
/// A `None` prefix means the namespace is the default (`xmlns="..."`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlNamespace {
    pub prefix: Option<&'static str>,
    pub uri: &'static str,
}

impl XmlNamespace {
    pub const fn unprefixed(uri: &'static str) -> Self {
        Self { prefix: None, uri }
    }

    pub const fn prefixed(prefix: &'static str, uri: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
            uri,
        }
    }

    fn declare(&self, namespaces: &mut Namespace) {
        namespaces.put(self.prefix.unwrap_or(""), self.uri);
    }
}

pub const NETCONF_BASE: XmlNamespace = XmlNamespace::unprefixed(BASE_NS);
pub const NETCONF_NOTIFICATION: XmlNamespace = XmlNamespace::unprefixed(NETCONF_NOTIFICATION_NS);
pub const SUBSCRIBED_NOTIFICATIONS: XmlNamespace = XmlNamespace::unprefixed(IETF_NOTIFICATION_NS);
pub const YANG_PUSH: XmlNamespace = XmlNamespace::prefixed("yp", IETF_PUSH_NS);

/// Two namespaces in play on one document: a default base namespace and a
/// prefixed extension namespace
///
/// Children are created through `base_*` or `extension_*` so the namespace of
/// each child is decided by which method is called, never by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespacePair {
    pub base: XmlNamespace,
    pub extension: XmlNamespace,
}

/// Subscribed-notifications as default namespace with yang-push under `yp`
pub const SUBSCRIBED_NOTIFICATIONS_WITH_PUSH: NamespacePair =
    NamespacePair::new(SUBSCRIBED_NOTIFICATIONS, YANG_PUSH);

impl NamespacePair {
    pub const fn new(base: XmlNamespace, extension: XmlNamespace) -> Self {
        Self { base, extension }
    }

    /// Create a root element in the base namespace declaring both namespaces
    pub fn root(&self, name: &str) -> Element {
        new_element_declaring(name, &self.base, &[&self.base, &self.extension])
    }

    /// Append a text-bearing child in the base namespace
    pub fn base_text(&self, parent: &mut Element, name: &str, text: impl Into<String>) {
        text_element(parent, name, &self.base, text);
    }

    /// Append a text-bearing child in the extension namespace
    pub fn extension_text(&self, parent: &mut Element, name: &str, text: impl Into<String>) {
        text_element(parent, name, &self.extension, text);
    }

    /// Append a presence-only child in the extension namespace
    pub fn extension_marker(&self, parent: &mut Element, name: &str) {
        sub_element(parent, name, &self.extension);
    }
}

/// Create an element qualified by `namespace` without declaring it
pub fn qualified_element(name: &str, namespace: &XmlNamespace) -> Element {
    let mut element = Element::new(name);
    element.namespace = Some(namespace.uri.to_string());
    element.prefix = namespace.prefix.map(str::to_string);
    element
}

/// Create a root element in `namespace`, declaring that namespace on it
pub fn new_element_ns(name: &str, namespace: &XmlNamespace) -> Element {
    new_element_declaring(name, namespace, &[namespace])
}

/// Create an element in `namespace` that declares every namespace in `declared`
pub fn new_element_declaring(
    name: &str,
    namespace: &XmlNamespace,
    declared: &[&XmlNamespace],
) -> Element {
    let mut namespaces = Namespace::empty();
    for ns in declared {
        ns.declare(&mut namespaces);
    }

    let mut element = qualified_element(name, namespace);
    element.namespaces = Some(namespaces);
    element
}

/// Append a presence-only (empty) child
pub fn sub_element(parent: &mut Element, name: &str, namespace: &XmlNamespace) {
    append(parent, qualified_element(name, namespace));
}

/// Append a child carrying `text` as its only content
pub fn text_element(
    parent: &mut Element,
    name: &str,
    namespace: &XmlNamespace,
    text: impl Into<String>,
) {
    let mut child = qualified_element(name, namespace);
    child.children.push(XMLNode::Text(text.into()));
    append(parent, child);
}

/// Append a pre-built fragment verbatim
///
/// Unqualified elements in the fragment stay unqualified on the wire: they
/// get an `xmlns=""` undeclaration wherever a default namespace could be
/// inherited from above.
pub fn append(parent: &mut Element, mut child: Element) {
    undeclare_default_namespace(&mut child, true);
    parent.children.push(XMLNode::Element(child));
}

// xml-rs never emits an empty default namespace from a `Namespace` map, so
// the undeclaration is written as a plain attribute.
fn undeclare_default_namespace(element: &mut Element, default_in_scope: bool) {
    let default_in_scope = match (&element.namespace, &element.prefix) {
        (None, _) => {
            if default_in_scope {
                element.attributes.insert("xmlns".to_string(), String::new());
            }
            false
        }
        (Some(_), None) => true,
        (Some(_), Some(_)) => default_in_scope || declares_default_namespace(element),
    };

    for node in element.children.iter_mut() {
        if let XMLNode::Element(child) = node {
            undeclare_default_namespace(child, default_in_scope);
        }
    }
}

fn declares_default_namespace(element: &Element) -> bool {
    element
        .namespaces
        .as_ref()
        .and_then(|namespaces| namespaces.get(""))
        .map_or(false, |uri| !uri.is_empty())
}

/// Iterate over the element children of `element`, skipping text and comments
pub fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Serialize an element without an XML declaration
pub fn to_xml_string(element: &Element) -> Result<String> {
    let mut buf = Vec::new();
    element
        .write_with_config(
            &mut buf,
            EmitterConfig::new().write_document_declaration(false),
        )
        .map_err(|e| ApiError::Xml(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ApiError::Xml(e.to_string()))
}

/// Parse a single element from XML text
///
/// Whitespace-only text is dropped, so `<stream> </stream>` parses back as an
/// element with no text. Text with any other character is kept as-is.
pub fn parse_element(xml: &str) -> Result<Element> {
    Element::parse(xml.as_bytes()).map_err(|e| ApiError::Xml(e.to_string()))
}
