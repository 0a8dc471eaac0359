//! Client configuration

use serde::{Deserialize, Serialize};

use crate::operation::ValidationLevel;

/// Configuration for `NetconfClient`
///
/// Deserializable so applications can embed it in their own config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Validation level applied to every request before it is built
    /// Default: boundary
    pub validation: ValidationLevel,

    /// Refuse to submit operations whose capabilities the server did not
    /// advertise. Has no effect until server capabilities are supplied.
    /// Default: true
    pub check_capabilities: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            validation: ValidationLevel::Boundary,
            check_capabilities: true,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject everything that can be detected locally
    pub fn strict() -> Self {
        Self {
            validation: ValidationLevel::Comprehensive,
            check_capabilities: true,
        }
    }

    /// Send whatever the caller asked for and let the server decide
    pub fn permissive() -> Self {
        Self {
            validation: ValidationLevel::None,
            check_capabilities: false,
        }
    }

    pub fn with_validation(mut self, level: ValidationLevel) -> Self {
        self.validation = level;
        self
    }

    pub fn with_capability_checks(mut self, enabled: bool) -> Self {
        self.check_capabilities = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ClientConfig::default().validation, ValidationLevel::Boundary);
        assert_eq!(ClientConfig::strict().validation, ValidationLevel::Comprehensive);
        assert!(!ClientConfig::permissive().check_capabilities);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "validation": "comprehensive" }"#).unwrap();
        assert_eq!(config.validation, ValidationLevel::Comprehensive);
        assert!(config.check_capabilities);
    }
}
