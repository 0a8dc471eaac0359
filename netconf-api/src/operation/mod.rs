//! Operation framework for NETCONF request documents
//!
//! This module provides the core pieces every operation builds on:
//! - The `NetconfOperation` trait tying a typed request to the document it produces
//! - Layered validation (none, boundary, comprehensive)
//! - A builder that validates and prepares a request for submission

mod builder;

pub use builder::*;

use serde::{Deserialize, Serialize};
use xmltree::Element;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter { parameter: String },

    #[error("Parameter '{parameter}' can only be used together with '{required}'")]
    DependentParameter { parameter: String, required: String },

    #[error("Parameters '{}' cannot be combined", .parameters.join("', '"))]
    ConflictingParameters { parameters: Vec<String> },

    #[error("Parameter '{parameter}' failed validation: {message}")]
    Custom { parameter: String, message: String },
}

impl ValidationError {
    pub fn range_error(
        parameter: &str,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(
        parameter: &str,
        value: impl std::fmt::Display,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }

    pub fn dependent(parameter: &str, required: &str) -> Self {
        Self::DependentParameter {
            parameter: parameter.to_string(),
            required: required.to_string(),
        }
    }

    pub fn conflicting(parameters: &[&str]) -> Self {
        Self::ConflictingParameters {
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Validation levels for operation parameters
///
/// Rules a document cannot be built without (such as `stop_time` requiring
/// `start_time`) are enforced at every level, including `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Only the rules the document itself depends on
    None,
    /// Light validation at API boundary
    #[default]
    Boundary,
    /// Full validation including protocol rules the server would otherwise reject
    Comprehensive,
}

/// Trait for types that can be validated
pub trait Validate {
    /// Perform light validation at the API boundary
    fn validate_boundary(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Perform comprehensive validation including protocol rules
    fn validate_comprehensive(&self) -> Result<(), ValidationError> {
        self.validate_boundary()
    }

    /// Validate with the specified level
    fn validate(&self, level: ValidationLevel) -> Result<(), ValidationError> {
        match level {
            ValidationLevel::None => Ok(()),
            ValidationLevel::Boundary => self.validate_boundary(),
            ValidationLevel::Comprehensive => self.validate_comprehensive(),
        }
    }
}

/// A NETCONF operation: a typed request and the document it becomes
///
/// Implementations are stateless; `build_request` is a pure function of the
/// request, so it can be called from any number of threads at once.
pub trait NetconfOperation {
    /// The request type for this operation
    type Request: Validate;

    /// Name of the operation's root element
    const NAME: &'static str;

    /// Namespace of the operation's root element
    const NAMESPACE: &'static str;

    /// Capabilities the server must advertise for this operation to be valid
    fn dependencies() -> &'static [&'static str] {
        &[]
    }

    /// Build the operation document for `request`
    ///
    /// Fails before any element is created if the request breaks a rule the
    /// document depends on.
    fn build_request(request: &Self::Request) -> Result<Element, ValidationError>;

    /// Capabilities required by this particular request
    ///
    /// Defaults to the static dependencies; operations whose parameters pull
    /// in extra capabilities (an XPath filter needs `:xpath`) extend it.
    fn required_capabilities(_request: &Self::Request) -> Vec<&'static str> {
        Self::dependencies().to_vec()
    }

    /// Get operation metadata for logging and diagnostics
    fn metadata() -> OperationMetadata {
        OperationMetadata {
            name: Self::NAME,
            namespace: Self::NAMESPACE,
            dependencies: Self::dependencies(),
        }
    }
}

/// Metadata about a NETCONF operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    /// Root element name (e.g., "create-subscription")
    pub name: &'static str,
    /// Root element namespace
    pub namespace: &'static str,
    /// Capabilities the operation depends on
    pub dependencies: &'static [&'static str],
}
