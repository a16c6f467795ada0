//! Provider configuration model
//!
//! [`ProviderConfig`] is the typed view of the provider block exactly as the
//! host supplied it; [`ResolvedConfig`] is the fully decided result of merging
//! it with the environment.
//!
//! # Host input
//!
//! The host sends the provider block as a JSON object together with an
//! optional marker object of the same shape flagging the attributes whose
//! value is not known yet:
//!
//! ```rust
//! use leaseweb_provider_config::{ConfigValue, ProviderConfig};
//! use serde_json::json;
//!
//! let config = json!({ "host": "api.example.com", "token": null });
//! let unknown = json!({ "token": true });
//!
//! let model = ProviderConfig::from_json(&config, Some(&unknown)).unwrap();
//! assert_eq!(model.host, ConfigValue::known("api.example.com"));
//! assert!(model.token.is_unknown());
//! assert!(model.scheme.is_null());
//! ```

use serde_json::Value;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::diagnostics::Diagnostics;
use crate::error::{ConfigError, Result};
use crate::value::ConfigValue;

/// Attribute name of the API host
pub const HOST_ATTRIBUTE: &str = "host";
/// Attribute name of the API scheme
pub const SCHEME_ATTRIBUTE: &str = "scheme";
/// Attribute name of the API token
pub const TOKEN_ATTRIBUTE: &str = "token";

/// Every attribute the provider block accepts, in schema order
pub const ATTRIBUTES: [&str; 3] = [HOST_ATTRIBUTE, SCHEME_ATTRIBUTE, TOKEN_ATTRIBUTE];

/// The provider block as configured by the user
///
/// Created fresh for every configure call. Only `token` is sensitive.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub host: ConfigValue,
    pub scheme: ConfigValue,
    pub token: ConfigValue,
}

impl ProviderConfig {
    /// Create an empty (all null) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host (builder pattern)
    pub fn with_host(mut self, host: impl Into<ConfigValue>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the scheme (builder pattern)
    pub fn with_scheme(mut self, scheme: impl Into<ConfigValue>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the token (builder pattern)
    pub fn with_token(mut self, token: impl Into<ConfigValue>) -> Self {
        self.token = token.into();
        self
    }

    /// Decode the provider block sent by the host
    ///
    /// Every decoding problem is reported; attributes are independent so
    /// one bad key does not hide another.
    pub fn from_json(
        config: &Value,
        unknown: Option<&Value>,
    ) -> std::result::Result<Self, Diagnostics> {
        let object = match config {
            Value::Object(object) => object,
            _ => return Err(ConfigError::InvalidConfigObject.to_diagnostic().into()),
        };

        let mut diagnostics = Diagnostics::new();
        for key in object.keys() {
            if !ATTRIBUTES.contains(&key.as_str()) {
                diagnostics.push(ConfigError::UnsupportedArgument(key.clone()).into());
            }
        }

        let mut decode = |name: &str| {
            if is_flagged_unknown(unknown, name) {
                return ConfigValue::Unknown;
            }
            decode_attribute(name, object.get(name)).unwrap_or_else(|err| {
                diagnostics.push(err.into());
                ConfigValue::Null
            })
        };

        let model = Self {
            host: decode(HOST_ATTRIBUTE),
            scheme: decode(SCHEME_ATTRIBUTE),
            token: decode(TOKEN_ATTRIBUTE),
        };

        if diagnostics.has_error() {
            Err(diagnostics)
        } else {
            Ok(model)
        }
    }
}

fn is_flagged_unknown(unknown: Option<&Value>, name: &str) -> bool {
    unknown
        .and_then(|marker| marker.get(name))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn decode_attribute(name: &str, value: Option<&Value>) -> Result<ConfigValue> {
    match value {
        None | Some(Value::Null) => Ok(ConfigValue::Null),
        Some(Value::String(s)) => Ok(ConfigValue::Known(s.clone())),
        Some(other) => Err(ConfigError::InvalidAttributeType {
            path: name.to_string(),
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host.as_known().unwrap_or(self.host.state()))
            .field("scheme", &self.scheme.as_known().unwrap_or(self.scheme.state()))
            .field("token", &self.token)
            .finish()
    }
}

/// Concrete connection settings after merging config and environment
///
/// An absent override means "let the client apply its own default"; it is
/// never represented by an empty string. The token is wiped from memory on
/// drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ResolvedConfig {
    token: String,
    host_override: Option<String>,
    scheme_override: Option<String>,
}

impl ResolvedConfig {
    /// Build resolved settings; empty overrides collapse to `None`
    pub fn new(
        token: impl Into<String>,
        host_override: Option<String>,
        scheme_override: Option<String>,
    ) -> Self {
        Self {
            token: token.into(),
            host_override: host_override.filter(|h| !h.is_empty()),
            scheme_override: scheme_override.filter(|s| !s.is_empty()),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn host_override(&self) -> Option<&str> {
        self.host_override.as_deref()
    }

    pub fn scheme_override(&self) -> Option<&str> {
        self.scheme_override.as_deref()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("token", &"<redacted>")
            .field("host_override", &self.host_override)
            .field("scheme_override", &self.scheme_override)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_known_and_null() {
        let model = ProviderConfig::from_json(
            &json!({ "host": "custom.example.com", "scheme": null }),
            None,
        )
        .unwrap();

        assert_eq!(model.host, ConfigValue::known("custom.example.com"));
        assert!(model.scheme.is_null());
        assert!(model.token.is_null());
    }

    #[test]
    fn test_decode_unknown_marker_wins() {
        let model = ProviderConfig::from_json(
            &json!({ "token": "placeholder" }),
            Some(&json!({ "token": true, "host": false })),
        )
        .unwrap();

        assert!(model.token.is_unknown());
        assert!(model.host.is_null());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let diags = ProviderConfig::from_json(&json!("token"), None).unwrap_err();
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.path, "");
        assert_eq!(diag.summary, "Invalid provider configuration");
    }

    #[test]
    fn test_decode_reports_every_problem() {
        let diags = ProviderConfig::from_json(
            &json!({ "host": 443, "token": ["s3cr3t"], "region": "eu" }),
            None,
        )
        .unwrap_err();

        assert_eq!(diags.len(), 3);
        assert_eq!(diags.for_path("region")[0].summary, "Unsupported argument");
        assert_eq!(diags.for_path("host")[0].summary, "Incorrect attribute value type");
        let token = diags.for_path("token");
        assert_eq!(token.len(), 1);
        assert!(token[0].detail.contains("found list"));
        assert!(!token[0].detail.contains("s3cr3t"));
    }

    #[test]
    fn test_debug_hides_token() {
        let model = ProviderConfig::new()
            .with_host("api.example.com")
            .with_token("s3cr3t");
        let rendered = format!("{:?}", model);
        assert!(rendered.contains("api.example.com"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn test_resolved_config_collapses_empty_overrides() {
        let resolved = ResolvedConfig::new("abc123", Some(String::new()), Some("http".into()));
        assert_eq!(resolved.token(), "abc123");
        assert_eq!(resolved.host_override(), None);
        assert_eq!(resolved.scheme_override(), Some("http"));
    }

    #[test]
    fn test_resolved_config_debug_redacts_token() {
        let resolved = ResolvedConfig::new("s3cr3t", None, None);
        assert!(!format!("{:?}", resolved).contains("s3cr3t"));
    }
}
