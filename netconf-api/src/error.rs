use netconf_transport::TransportError;
use thiserror::Error;

use crate::operation::ValidationError;

/// High-level API errors for NETCONF subscription operations
///
/// Validation and capability failures are raised locally, before anything is
/// sent. Transport failures are carried unchanged from the session layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid or inconsistent request parameters
    ///
    /// Raised while building the request document, so the request is never
    /// submitted.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),

    /// The server does not advertise a capability the operation depends on
    ///
    /// Only raised when capability checking is enabled and the server's
    /// capabilities are known to the client.
    #[error("Operation '{operation}' requires capability '{capability}' which the server does not advertise")]
    MissingCapability {
        operation: &'static str,
        capability: String,
    },

    /// Session or transport failure, exactly as reported by the session layer
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// XML serialization or parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_conversion() {
        let validation = ValidationError::DependentParameter {
            parameter: "stop_time".to_string(),
            required: "start_time".to_string(),
        };
        let api_error: ApiError = validation.into();
        assert!(matches!(
            api_error,
            ApiError::InvalidParameter(ValidationError::DependentParameter { .. })
        ));
    }

    #[test]
    fn test_transport_error_passes_through() {
        let api_error: ApiError = TransportError::SessionClosed.into();
        assert!(matches!(api_error, ApiError::Transport(TransportError::SessionClosed)));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::MissingCapability {
            operation: "create-subscription",
            capability: ":notification".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Operation 'create-subscription' requires capability ':notification' which the server does not advertise"
        );

        let err = ApiError::Transport(TransportError::Io("broken pipe".to_string()));
        assert_eq!(err.to_string(), "Transport error: I/O error: broken pipe");
    }
}
