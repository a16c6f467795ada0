//! Error types for provider configuration
//!
//! Errors never cross the host boundary as-is: every variant is turned into
//! a [`Diagnostic`] with a path and a remediation hint.

use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::env::TOKEN_ENV;

/// Configuration errors detected before a client can be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The token depends on a value the host has not computed yet
    #[error("Unknown Leaseweb API token")]
    UnknownToken,

    /// No usable token after merging config and environment
    #[error("Missing Leaseweb API token")]
    MissingToken,

    /// The provider block is not an object
    #[error("Invalid provider configuration")]
    InvalidConfigObject,

    /// The provider block contains an attribute the schema does not declare
    #[error("Unsupported argument: {0}")]
    UnsupportedArgument(String),

    /// An attribute holds something other than a string
    #[error("Incorrect attribute value type for {path}")]
    InvalidAttributeType { path: String, found: &'static str },
}

impl ConfigError {
    /// Attribute path the error is reported against
    pub fn path(&self) -> &str {
        match self {
            ConfigError::UnknownToken | ConfigError::MissingToken => "token",
            ConfigError::InvalidConfigObject => "",
            ConfigError::UnsupportedArgument(path) => path.as_str(),
            ConfigError::InvalidAttributeType { path, .. } => path.as_str(),
        }
    }

    /// Short summary shown to the operator
    pub fn summary(&self) -> &'static str {
        match self {
            ConfigError::UnknownToken => "Unknown Leaseweb API token",
            ConfigError::MissingToken => "Missing Leaseweb API token",
            ConfigError::InvalidConfigObject => "Invalid provider configuration",
            ConfigError::UnsupportedArgument(_) => "Unsupported argument",
            ConfigError::InvalidAttributeType { .. } => "Incorrect attribute value type",
        }
    }

    /// Remediation-oriented detail. Never includes attribute values.
    pub fn detail(&self) -> String {
        match self {
            ConfigError::UnknownToken => format!(
                "The provider cannot create the Leaseweb API client as there is an unknown \
                 configuration value for the Leaseweb API token. Either target apply the source \
                 of the value first, set the value statically in the configuration, or use the \
                 {TOKEN_ENV} environment variable."
            ),
            ConfigError::MissingToken => format!(
                "The provider cannot create the Leaseweb API client as there is a missing or \
                 empty value for the Leaseweb API token. Set the token value in the configuration \
                 or use the {TOKEN_ENV} environment variable. If either is already set, ensure \
                 the value is not empty."
            ),
            ConfigError::InvalidConfigObject => {
                "The provider configuration must be an object with the optional attributes \
                 host, scheme and token."
                    .to_string()
            }
            ConfigError::UnsupportedArgument(path) => format!(
                "An argument named \"{path}\" is not expected here. Supported arguments are \
                 host, scheme and token."
            ),
            ConfigError::InvalidAttributeType { path, found } => format!(
                "Inappropriate value for attribute \"{path}\": a string is required, found {found}."
            ),
        }
    }

    /// Convert into an error diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::attribute_error(self.path(), self.summary(), self.detail())
    }
}

impl From<ConfigError> for Diagnostic {
    fn from(err: ConfigError) -> Self {
        err.to_diagnostic()
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
