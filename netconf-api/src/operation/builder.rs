//! Operation builder for validated request construction
//!
//! This module provides the builder pattern for turning a typed request into
//! a finished operation document at a chosen validation level.

use super::{NetconfOperation, OperationMetadata, Validate, ValidationError, ValidationLevel};
use std::marker::PhantomData;
use xmltree::Element;

/// Builder for preparing NETCONF operations
///
/// # Type Parameters
/// * `Op` - The NETCONF operation type being built
pub struct OperationBuilder<Op: NetconfOperation> {
    request: Op::Request,
    validation: ValidationLevel,
    _phantom: PhantomData<Op>,
}

impl<Op: NetconfOperation> OperationBuilder<Op> {
    /// Create a new operation builder with the given request
    pub fn new(request: Op::Request) -> Self {
        Self {
            request,
            validation: ValidationLevel::default(),
            _phantom: PhantomData,
        }
    }

    /// Set the validation level for the operation
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn with_validation(mut self, level: ValidationLevel) -> Self {
        self.validation = level;
        self
    }

    /// Get the current validation level
    pub fn validation_level(&self) -> ValidationLevel {
        self.validation
    }

    /// Get the request being built
    pub fn request(&self) -> &Op::Request {
        &self.request
    }

    /// Validate the request and build its document
    ///
    /// # Returns
    /// A PreparedOperation holding the finished document, or the first
    /// validation error encountered
    pub fn build(self) -> Result<PreparedOperation<Op>, ValidationError> {
        self.request.validate(self.validation)?;
        let document = Op::build_request(&self.request)?;

        Ok(PreparedOperation {
            document,
            required_capabilities: Op::required_capabilities(&self.request),
            validation: self.validation,
            metadata: Op::metadata(),
            _phantom: PhantomData,
        })
    }
}

/// An operation document ready for submission
///
/// # Type Parameters
/// * `Op` - The NETCONF operation type
pub struct PreparedOperation<Op: NetconfOperation> {
    document: Element,
    required_capabilities: Vec<&'static str>,
    validation: ValidationLevel,
    metadata: OperationMetadata,
    _phantom: PhantomData<Op>,
}

impl<Op: NetconfOperation> PreparedOperation<Op> {
    /// Get the built operation document
    pub fn document(&self) -> &Element {
        &self.document
    }

    /// Take ownership of the built operation document
    pub fn into_document(self) -> Element {
        self.document
    }

    /// Capabilities the server must advertise for this request
    pub fn required_capabilities(&self) -> &[&'static str] {
        &self.required_capabilities
    }

    /// Get the validation level the request was checked at
    pub fn validation_level(&self) -> ValidationLevel {
        self.validation
    }

    /// Get the operation metadata
    pub fn metadata(&self) -> &OperationMetadata {
        &self.metadata
    }
}

impl<Op: NetconfOperation> std::fmt::Debug for PreparedOperation<Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedOperation")
            .field("name", &self.metadata.name)
            .field("namespace", &self.metadata.namespace)
            .field("validation", &self.validation)
            .field("required_capabilities", &self.required_capabilities)
            .finish()
    }
}

impl<Op: NetconfOperation> Clone for PreparedOperation<Op> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            required_capabilities: self.required_capabilities.clone(),
            validation: self.validation,
            metadata: self.metadata.clone(),
            _phantom: PhantomData,
        }
    }
}
