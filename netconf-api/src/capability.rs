//! NETCONF capability identifiers
//!
//! Operations declare the capabilities they depend on using the short
//! `:name` form. Servers advertise full URIs such as
//! `urn:ietf:params:netconf:capability:notification:1.0`; `Capabilities`
//! stores both so either form can be queried.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// RFC 5277 event notifications
pub const NOTIFICATION: &str = ":notification";

/// RFC 5277 interleave (other rpcs allowed while a subscription is active)
pub const INTERLEAVE: &str = ":interleave";

/// XPath filtering
pub const XPATH: &str = ":xpath";

const CAPABILITY_URN_PREFIX: &str = "urn:ietf:params:netconf:capability:";
const CAPABILITY_NS_PREFIX: &str = "urn:ietf:params:xml:ns:netconf:capability:";
const BASE_URN_PREFIX: &str = "urn:ietf:params:netconf:base:";
const BASE_NS_PREFIX: &str = "urn:ietf:params:xml:ns:netconf:base:";

/// Short forms of a capability URI
///
/// `urn:ietf:params:netconf:capability:notification:1.0` abbreviates to
/// `:notification` and `:notification:1.0`; `urn:ietf:params:netconf:base:1.1`
/// to `:base` and `:base:1.1`. URIs outside the IETF NETCONF tree have none.
pub fn abbreviations(uri: &str) -> Vec<String> {
    // Drop query parameters (module=..., revision=...)
    let uri = uri.split('?').next().unwrap_or(uri);

    let capability = uri
        .strip_prefix(CAPABILITY_URN_PREFIX)
        .or_else(|| uri.strip_prefix(CAPABILITY_NS_PREFIX));
    if let Some(rest) = capability {
        let mut parts = rest.splitn(2, ':');
        return match (parts.next(), parts.next()) {
            (Some(name), Some(version)) if !name.is_empty() => {
                vec![format!(":{}", name), format!(":{}:{}", name, version)]
            }
            (Some(name), None) if !name.is_empty() => vec![format!(":{}", name)],
            _ => Vec::new(),
        };
    }

    let base = uri
        .strip_prefix(BASE_URN_PREFIX)
        .or_else(|| uri.strip_prefix(BASE_NS_PREFIX));
    match base {
        Some(version) if !version.is_empty() => {
            vec![":base".to_string(), format!(":base:{}", version)]
        }
        _ => Vec::new(),
    }
}

/// The set of capabilities a server advertised
///
/// Filled in by the caller from whatever capability exchange the session
/// performed; nothing in this crate discovers capabilities itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeSet<String>", into = "BTreeSet<String>")]
pub struct Capabilities {
    uris: BTreeSet<String>,
    abbreviated: BTreeSet<String>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an advertised capability URI
    pub fn insert(&mut self, uri: impl Into<String>) {
        let uri = uri.into();
        self.abbreviated.extend(abbreviations(&uri));
        self.uris.insert(uri);
    }

    /// Whether `capability` (full URI or `:short` form) was advertised
    pub fn supports(&self, capability: &str) -> bool {
        self.uris.contains(capability) || self.abbreviated.contains(capability)
    }

    /// The subset of `required` that was not advertised, in order
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|capability| !self.supports(capability))
            .collect()
    }

    /// Advertised URIs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Capabilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut capabilities = Capabilities::new();
        for uri in iter {
            capabilities.insert(uri);
        }
        capabilities
    }
}

impl From<BTreeSet<String>> for Capabilities {
    fn from(uris: BTreeSet<String>) -> Self {
        uris.into_iter().collect()
    }
}

impl From<Capabilities> for BTreeSet<String> {
    fn from(capabilities: Capabilities) -> Self {
        capabilities.uris
    }
}
