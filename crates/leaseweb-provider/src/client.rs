//! Leaseweb API client construction
//!
//! The provider never talks to the API itself; it hands a [`ClientHandle`] to
//! every data source and resource. The handle is built once per process by a
//! [`ClientFactory`] and is immutable afterwards, so it can be read from any
//! number of threads without synchronisation.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use zeroize::Zeroizing;

use leaseweb_provider_config::ResolvedConfig;

/// Host used when no override is configured
pub const DEFAULT_HOST: &str = "api.leaseweb.com";
/// Scheme used when no override is configured
pub const DEFAULT_SCHEME: &str = "https";

/// Shared, read-only client handle
pub type ClientHandle = Arc<LeasewebClient>;

/// Errors raised while building a client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Unsupported scheme \"{0}\", expected \"http\" or \"https\"")]
    UnsupportedScheme(String),

    #[error("Invalid host \"{0}\"")]
    InvalidHost(String),
}

/// Optional connection settings; `None` selects the client default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOverrides {
    pub host: Option<String>,
    pub scheme: Option<String>,
}

impl From<&ResolvedConfig> for ClientOverrides {
    fn from(resolved: &ResolvedConfig) -> Self {
        Self {
            host: resolved.host_override().map(str::to_string),
            scheme: resolved.scheme_override().map(str::to_string),
        }
    }
}

/// Connection context for the Leaseweb API
pub struct LeasewebClient {
    token: Zeroizing<String>,
    scheme: String,
    host: String,
    user_agent: String,
}

impl LeasewebClient {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Base URL all API requests are made against
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Token sent in the `X-LSW-Auth` header
    pub fn api_token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for LeasewebClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeasewebClient")
            .field("base_url", &self.base_url())
            .field("user_agent", &self.user_agent)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builds the shared client handle from validated settings
pub trait ClientFactory: Send + Sync {
    /// Build a client
    ///
    /// Only malformed overrides may fail; the token has already been checked
    /// for presence.
    fn new_client(
        &self,
        token: &str,
        overrides: &ClientOverrides,
        version: &str,
    ) -> Result<ClientHandle, ClientError>;
}

/// Factory producing [`LeasewebClient`] handles
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClientFactory;

impl ClientFactory for DefaultClientFactory {
    fn new_client(
        &self,
        token: &str,
        overrides: &ClientOverrides,
        version: &str,
    ) -> Result<ClientHandle, ClientError> {
        let scheme = overrides.scheme.as_deref().unwrap_or(DEFAULT_SCHEME);
        if !matches!(scheme, "http" | "https") {
            return Err(ClientError::UnsupportedScheme(scheme.to_string()));
        }

        let host = overrides.host.as_deref().unwrap_or(DEFAULT_HOST);
        if host.is_empty() || host.contains('/') || host.chars().any(char::is_whitespace) {
            return Err(ClientError::InvalidHost(host.to_string()));
        }

        Ok(Arc::new(LeasewebClient {
            token: Zeroizing::new(token.to_string()),
            scheme: scheme.to_string(),
            host: host.to_string(),
            user_agent: format!("terraform-provider-leaseweb/{version}"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(host: Option<&str>, scheme: Option<&str>) -> ClientOverrides {
        ClientOverrides {
            host: host.map(str::to_string),
            scheme: scheme.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_apply_without_overrides() {
        let client = DefaultClientFactory
            .new_client("abc123", &ClientOverrides::default(), "1.2.3")
            .unwrap();

        assert_eq!(client.base_url(), "https://api.leaseweb.com");
        assert_eq!(client.user_agent(), "terraform-provider-leaseweb/1.2.3");
        assert_eq!(client.api_token(), "abc123");
    }

    #[test]
    fn test_overrides_apply() {
        let client = DefaultClientFactory
            .new_client("abc123", &overrides(Some("localhost:8080"), Some("http")), "dev")
            .unwrap();

        assert_eq!(client.host(), "localhost:8080");
        assert_eq!(client.scheme(), "http");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = DefaultClientFactory
            .new_client("abc123", &overrides(None, Some("ftp")), "dev")
            .unwrap_err();
        assert_eq!(err, ClientError::UnsupportedScheme("ftp".into()));
    }

    #[test]
    fn test_invalid_host() {
        for host in ["api.example.com/v2", "api example.com"] {
            let err = DefaultClientFactory
                .new_client("abc123", &overrides(Some(host), None), "dev")
                .unwrap_err();
            assert!(matches!(err, ClientError::InvalidHost(_)));
        }
    }

    #[test]
    fn test_overrides_from_resolved_config() {
        let resolved = ResolvedConfig::new("abc123", Some("h.example.com".into()), None);
        let overrides = ClientOverrides::from(&resolved);
        assert_eq!(overrides.host.as_deref(), Some("h.example.com"));
        assert_eq!(overrides.scheme, None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = DefaultClientFactory
            .new_client("s3cr3t", &ClientOverrides::default(), "dev")
            .unwrap();
        assert!(!format!("{:?}", client).contains("s3cr3t"));
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientHandle>();
    }
}
