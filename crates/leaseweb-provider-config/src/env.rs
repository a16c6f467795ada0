//! Environment variable lookup
//!
//! Resolution never calls `std::env` directly; it goes through an
//! [`EnvironmentReader`] so that precedence can be tested without touching
//! the real process environment.
//!
//! # Variables
//!
//! - `LEASEWEB_HOST`: API host, used when `host` is not configured
//! - `LEASEWEB_SCHEME`: API scheme, used when `scheme` is not configured
//! - `LEASEWEB_TOKEN`: API token, used when `token` is not configured

use std::collections::BTreeMap;

/// Environment variable consulted for the API host
pub const HOST_ENV: &str = "LEASEWEB_HOST";
/// Environment variable consulted for the API scheme
pub const SCHEME_ENV: &str = "LEASEWEB_SCHEME";
/// Environment variable consulted for the API token
pub const TOKEN_ENV: &str = "LEASEWEB_TOKEN";

/// Read-only view of environment variables
///
/// Implementations are pure lookups: no caching, no side effects.
#[cfg_attr(test, mockall::automock)]
pub trait EnvironmentReader: Send + Sync {
    /// Get the value of a variable, `None` when it is not set
    fn var(&self, name: &str) -> Option<String>;
}

/// Lookups derived from [`EnvironmentReader::var`]
pub trait EnvironmentReaderExt: EnvironmentReader {
    /// Get the value of a variable, treating an empty value as not set
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }
}

impl<T: EnvironmentReader + ?Sized> EnvironmentReaderExt for T {}

/// Reader backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentReader for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(
                    variable = name,
                    "Environment variable contains invalid UTF-8, ignoring it"
                );
                None
            }
        }
    }
}

/// In-memory reader with a fixed set of variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: BTreeMap<String, String>,
}

impl MapEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable (builder pattern)
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvironmentReader for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<T: EnvironmentReader + ?Sized> EnvironmentReader for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

impl<T: EnvironmentReader + ?Sized> EnvironmentReader for std::sync::Arc<T> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_environment_lookup() {
        let env = MapEnvironment::new()
            .with_var(HOST_ENV, "api.example.com")
            .with_var(TOKEN_ENV, "abc123");

        assert_eq!(env.var(HOST_ENV).as_deref(), Some("api.example.com"));
        assert_eq!(env.var(SCHEME_ENV), None);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_non_empty_var_filters_empty_values() {
        let env: MapEnvironment = [(SCHEME_ENV, ""), (TOKEN_ENV, "abc123")]
            .into_iter()
            .collect();

        assert_eq!(env.var(SCHEME_ENV).as_deref(), Some(""));
        assert_eq!(env.non_empty_var(SCHEME_ENV), None);
        assert_eq!(env.non_empty_var(TOKEN_ENV).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_reference_forwarding() {
        let env = MapEnvironment::new().with_var(HOST_ENV, "h");
        let by_ref: &dyn EnvironmentReader = &env;
        assert_eq!(by_ref.non_empty_var(HOST_ENV).as_deref(), Some("h"));
    }

    #[test]
    fn test_process_environment_missing_variable() {
        let env = ProcessEnvironment::new();
        assert_eq!(env.var("LEASEWEB_PROVIDER_TEST_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn test_process_environment_reads_env() {
        std::env::set_var("LEASEWEB_PROVIDER_TEST_PROCESS_ENV", "value");
        let value = ProcessEnvironment::new().var("LEASEWEB_PROVIDER_TEST_PROCESS_ENV");
        std::env::remove_var("LEASEWEB_PROVIDER_TEST_PROCESS_ENV");

        assert_eq!(value.as_deref(), Some("value"));
    }
}
