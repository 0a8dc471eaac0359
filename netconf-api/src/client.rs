use netconf_transport::Transport;

use crate::capability::Capabilities;
use crate::config::ClientConfig;
use crate::operation::{NetconfOperation, OperationBuilder, PreparedOperation};
use crate::operations::{
    CreateSubscriptionOperation, CreateSubscriptionRequest, DeleteSubscriptionOperation,
    DeleteSubscriptionRequest, EstablishSubscriptionOperation, EstablishSubscriptionRequest,
};
use crate::{ApiError, Result};

/// A client for submitting NETCONF operations over a transport
///
/// The client bridges the stateless operation builders and a session. It
/// validates and builds the request document, optionally checks the server's
/// advertised capabilities, and hands the document to the transport. Whatever
/// the transport returns is returned unchanged.
///
/// ```rust,ignore
/// use netconf_api::{NetconfClient, operations::CreateSubscriptionRequest};
/// use netconf_transport::Session;
///
/// let client = NetconfClient::new(Session::new(stream));
/// let reply = client.create_subscription(
///     CreateSubscriptionRequest::new().with_stream("NETCONF"),
/// )?;
/// ```
#[derive(Debug)]
pub struct NetconfClient<T: Transport> {
    transport: T,
    config: ClientConfig,
    server_capabilities: Option<Capabilities>,
}

impl<T: Transport> NetconfClient<T> {
    /// Create a client with default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            server_capabilities: None,
        }
    }

    /// Record the capabilities the server advertised
    pub fn with_server_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.server_capabilities = Some(capabilities);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn server_capabilities(&self) -> Option<&Capabilities> {
        self.server_capabilities.as_ref()
    }

    /// Validate and build a request at the configured validation level
    pub fn prepare<Op: NetconfOperation>(
        &self,
        request: Op::Request,
    ) -> Result<PreparedOperation<Op>> {
        let prepared = OperationBuilder::<Op>::new(request)
            .with_validation(self.config.validation)
            .build()?;
        Ok(prepared)
    }

    /// Build and submit an operation
    ///
    /// # Returns
    /// The transport's reply, or the first validation, capability or
    /// transport error
    pub fn execute<Op: NetconfOperation>(&self, request: Op::Request) -> Result<T::Reply> {
        let prepared = self.prepare::<Op>(request)?;
        self.execute_prepared(&prepared)
    }

    /// Submit an operation that was already prepared
    pub fn execute_prepared<Op: NetconfOperation>(
        &self,
        operation: &PreparedOperation<Op>,
    ) -> Result<T::Reply> {
        self.check_capabilities(operation)?;

        tracing::debug!(operation = Op::NAME, "Submitting operation");
        let reply = self.transport.submit_request(operation.document())?;
        Ok(reply)
    }

    /// Create an RFC 5277 subscription
    pub fn create_subscription(&self, request: CreateSubscriptionRequest) -> Result<T::Reply> {
        self.execute::<CreateSubscriptionOperation>(request)
    }

    /// Establish a dynamic subscription
    pub fn establish_subscription(
        &self,
        request: EstablishSubscriptionRequest,
    ) -> Result<T::Reply> {
        self.execute::<EstablishSubscriptionOperation>(request)
    }

    /// Delete a dynamic subscription
    pub fn delete_subscription(&self, request: DeleteSubscriptionRequest) -> Result<T::Reply> {
        self.execute::<DeleteSubscriptionOperation>(request)
    }

    fn check_capabilities<Op: NetconfOperation>(
        &self,
        operation: &PreparedOperation<Op>,
    ) -> Result<()> {
        if !self.config.check_capabilities {
            return Ok(());
        }
        let Some(capabilities) = &self.server_capabilities else {
            return Ok(());
        };

        match capabilities.missing(operation.required_capabilities()).first() {
            Some(missing) => Err(ApiError::MissingCapability {
                operation: Op::NAME,
                capability: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}
