//! Configuration resolution
//!
//! Merges the user's provider block with the environment. Precedence per
//! attribute, highest first:
//!
//! 1. a value set in the provider block
//! 2. a non-empty environment variable
//! 3. for `host` and `scheme` only: the client's own default (expressed as
//!    an absent override)
//!
//! The token has no third tier; without it no client can be built.
//!
//! # Check order
//!
//! The order below is load-bearing; each step assumes the earlier ones
//! passed:
//!
//! 1. an unknown token stops everything, before the environment is read
//! 2. host, scheme and token are merged independently
//! 3. an empty merged token stops with a missing-credential error
//! 4. any error means no [`ResolvedConfig`] is handed out

use std::fmt;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::env::{EnvironmentReader, EnvironmentReaderExt, HOST_ENV, SCHEME_ENV, TOKEN_ENV};
use crate::error::ConfigError;
use crate::model::{
    ProviderConfig, ResolvedConfig, HOST_ATTRIBUTE, SCHEME_ATTRIBUTE, TOKEN_ATTRIBUTE,
};
use crate::value::ConfigValue;

/// Where a resolved attribute came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Set in the provider block
    Config,
    /// Read from the environment
    Environment,
    /// Left to the client default
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Config => write!(f, "config"),
            ValueSource::Environment => write!(f, "environment"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// Outcome of a resolution
///
/// `resolved` is only present when `diagnostics` holds no error.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub resolved: Option<ResolvedConfig>,
    pub diagnostics: Diagnostics,
}

impl Resolution {
    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            resolved: None,
            diagnostics,
        }
    }

    /// Whether a usable configuration was produced
    pub fn is_success(&self) -> bool {
        self.resolved.is_some()
    }

    /// Split into the resolved settings or the diagnostics explaining why not
    pub fn into_result(self) -> Result<(ResolvedConfig, Diagnostics), Diagnostics> {
        match self.resolved {
            Some(resolved) => Ok((resolved, self.diagnostics)),
            None => Err(self.diagnostics),
        }
    }
}

/// Merges [`ProviderConfig`] with an [`EnvironmentReader`]
pub struct ConfigResolver<'a, E: EnvironmentReader + ?Sized> {
    env: &'a E,
}

impl<'a, E: EnvironmentReader + ?Sized> ConfigResolver<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self { env }
    }

    /// Resolve the provider block against the environment
    pub fn resolve(&self, config: &ProviderConfig) -> Resolution {
        let mut diagnostics = Diagnostics::new();

        // Any value read now could change before apply.
        if config.token.is_unknown() {
            tracing::debug!("Leaseweb API token is unknown, skipping resolution");
            diagnostics.push(ConfigError::UnknownToken.into());
            return Resolution::failed(diagnostics);
        }

        let (host, host_source) = self.merge(HOST_ATTRIBUTE, &config.host, HOST_ENV);
        let (scheme, scheme_source) = self.merge(SCHEME_ATTRIBUTE, &config.scheme, SCHEME_ENV);
        let (token, token_source) = self.merge(TOKEN_ATTRIBUTE, &config.token, TOKEN_ENV);

        let overrides = [(HOST_ATTRIBUTE, &config.host), (SCHEME_ATTRIBUTE, &config.scheme)];
        for (attribute, value) in overrides {
            if value.is_unknown() {
                diagnostics.push(unknown_override(attribute));
            }
        }

        tracing::debug!(
            host = %host_source,
            scheme = %scheme_source,
            token = %token_source,
            "Merged Leaseweb provider attributes"
        );

        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => {
                diagnostics.push(ConfigError::MissingToken.into());
                return Resolution::failed(diagnostics);
            }
        };

        if diagnostics.has_error() {
            return Resolution::failed(diagnostics);
        }

        Resolution {
            resolved: Some(ResolvedConfig::new(token, host, scheme)),
            diagnostics,
        }
    }

    /// Apply the config > environment > default precedence to one attribute
    ///
    /// A non-null config value owns the attribute even when it is empty or
    /// unknown; the environment is only consulted for null values.
    fn merge(
        &self,
        attribute: &str,
        value: &ConfigValue,
        env_name: &str,
    ) -> (Option<String>, ValueSource) {
        let merged = match value {
            ConfigValue::Known(value) => (Some(value.clone()), ValueSource::Config),
            ConfigValue::Unknown => (None, ValueSource::Default),
            ConfigValue::Null => match self.env.non_empty_var(env_name) {
                Some(value) => (Some(value), ValueSource::Environment),
                None => (None, ValueSource::Default),
            },
        };
        tracing::trace!(attribute, state = value.state(), source = %merged.1, "Resolved attribute");
        merged
    }
}

fn unknown_override(attribute: &str) -> Diagnostic {
    Diagnostic::attribute_info(
        attribute,
        format!("Unknown Leaseweb API {attribute}"),
        format!(
            "The {attribute} depends on a value that is not known yet, so the Leaseweb API \
             client default is used for this run. Set the value statically to override it."
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::env::{MapEnvironment, MockEnvironmentReader};

    fn resolve(config: &ProviderConfig, env: &MapEnvironment) -> Resolution {
        ConfigResolver::new(env).resolve(config)
    }

    #[test]
    fn test_unknown_token_never_reads_environment() {
        let mut env = MockEnvironmentReader::new();
        env.expect_var().times(0);

        let config = ProviderConfig::new()
            .with_host("custom.example.com")
            .with_token(ConfigValue::Unknown);
        let resolution = ConfigResolver::new(&env).resolve(&config);

        assert!(!resolution.is_success());
        assert_eq!(resolution.diagnostics.len(), 1);
        let diag = &resolution.diagnostics.for_path("token")[0];
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.summary, "Unknown Leaseweb API token");
    }

    #[test]
    fn test_null_attributes_read_each_variable_once() {
        let mut env = MockEnvironmentReader::new();
        env.expect_var()
            .withf(|name| name == HOST_ENV)
            .times(1)
            .returning(|_| None);
        env.expect_var()
            .withf(|name| name == SCHEME_ENV)
            .times(1)
            .returning(|_| Some("http".to_string()));
        env.expect_var()
            .withf(|name| name == TOKEN_ENV)
            .times(1)
            .returning(|_| Some("abc123".to_string()));

        let resolution = ConfigResolver::new(&env).resolve(&ProviderConfig::new());
        let resolved = resolution.resolved.unwrap();

        assert_eq!(resolved.token(), "abc123");
        assert_eq!(resolved.host_override(), None);
        assert_eq!(resolved.scheme_override(), Some("http"));
    }

    #[test]
    fn test_known_values_skip_environment() {
        let mut env = MockEnvironmentReader::new();
        env.expect_var().times(0);

        let config = ProviderConfig::new()
            .with_host("h.example.com")
            .with_scheme("https")
            .with_token("abc123");
        let resolution = ConfigResolver::new(&env).resolve(&config);

        assert!(resolution.is_success());
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_token_from_environment_only() {
        let env = MapEnvironment::new().with_var(TOKEN_ENV, "abc123");
        let resolution = resolve(&ProviderConfig::new(), &env);

        let (resolved, diagnostics) = resolution.into_result().unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(resolved.token(), "abc123");
        assert_eq!(resolved.host_override(), None);
        assert_eq!(resolved.scheme_override(), None);
    }

    #[test]
    fn test_config_host_beats_environment() {
        let env = MapEnvironment::new()
            .with_var(HOST_ENV, "other.example.com")
            .with_var(TOKEN_ENV, "abc123");
        let config = ProviderConfig::new().with_host("custom.example.com");

        let resolved = resolve(&config, &env).resolved.unwrap();
        assert_eq!(resolved.host_override(), Some("custom.example.com"));
    }

    #[test]
    fn test_missing_token_is_single_error() {
        let env = MapEnvironment::new().with_var(HOST_ENV, "api.example.com");
        let resolution = resolve(&ProviderConfig::new(), &env);

        assert!(resolution.resolved.is_none());
        assert_eq!(resolution.diagnostics.len(), 1);
        let diag = &resolution.diagnostics.for_path("token")[0];
        assert_eq!(diag.summary, "Missing Leaseweb API token");
    }

    #[test]
    fn test_empty_environment_token_is_missing() {
        let env = MapEnvironment::new().with_var(TOKEN_ENV, "");
        let resolution = resolve(&ProviderConfig::new(), &env);

        assert!(resolution.resolved.is_none());
        assert_eq!(resolution.diagnostics.errors().len(), 1);
    }

    #[test]
    fn test_empty_config_token_does_not_fall_back() {
        let env = MapEnvironment::new().with_var(TOKEN_ENV, "abc123");
        let config = ProviderConfig::new().with_token("");

        let resolution = resolve(&config, &env);
        assert!(resolution.resolved.is_none());
        assert_eq!(
            resolution.diagnostics.for_path("token")[0].summary,
            "Missing Leaseweb API token"
        );
    }

    #[test]
    fn test_unknown_host_uses_default_with_info() {
        let env = MapEnvironment::new()
            .with_var(HOST_ENV, "env.example.com")
            .with_var(TOKEN_ENV, "abc123");
        let config = ProviderConfig::new().with_host(ConfigValue::Unknown);

        let resolution = resolve(&config, &env);
        let (resolved, diagnostics) = resolution.into_result().unwrap();

        assert_eq!(resolved.host_override(), None);
        assert!(!diagnostics.has_error());
        let info = diagnostics.for_path("host");
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].severity, Severity::Info);
    }

    #[test]
    fn test_value_source_display() {
        assert_eq!(ValueSource::Config.to_string(), "config");
        assert_eq!(ValueSource::Environment.to_string(), "environment");
        assert_eq!(ValueSource::Default.to_string(), "default");
    }
}
