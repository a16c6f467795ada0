//! Provider facade
//!
//! [`LeasewebProvider`] answers the host's lifecycle calls. Over one process
//! lifetime it moves through:
//!
//! ```text
//! Uninitialized --configure--> Configuring --+--> Configured
//!                                            +--> ConfigurationFailed
//! ```
//!
//! Metadata, schema and capability listing never change the state. Both
//! terminal states are final: a failed configuration is reported once through
//! diagnostics and the host restarts the plugin to retry.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use leaseweb_provider_config::{
    ConfigResolver, Diagnostic, Diagnostics, EnvironmentReader, ProviderConfig,
};

use crate::client::{ClientFactory, ClientHandle, ClientOverrides, DefaultClientFactory};
use crate::masking::SecretMask;
use crate::registry::{self, RegistryEntry};
use crate::schema::{provider_schema, ProviderSchema};

/// Type name the host registers the provider under
pub const PROVIDER_TYPE_NAME: &str = "leaseweb";

/// Provider identity reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

/// Lifecycle state of the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    Uninitialized,
    Configuring,
    Configured,
    ConfigurationFailed,
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderState::Uninitialized => write!(f, "uninitialized"),
            ProviderState::Configuring => write!(f, "configuring"),
            ProviderState::Configured => write!(f, "configured"),
            ProviderState::ConfigurationFailed => write!(f, "configuration_failed"),
        }
    }
}

/// Result of a configure call
///
/// Both shared-state slots carry the same handle on success and are empty
/// otherwise.
#[derive(Debug, Clone, Default)]
pub struct ConfigureResponse {
    pub diagnostics: Diagnostics,
    pub data_source_data: Option<ClientHandle>,
    pub resource_data: Option<ClientHandle>,
}

impl ConfigureResponse {
    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics,
            ..Default::default()
        }
    }
}

/// The Leaseweb provider
pub struct LeasewebProvider<F = DefaultClientFactory> {
    version: String,
    factory: F,
    mask: SecretMask,
    state: ProviderState,
    client: Option<ClientHandle>,
}

impl LeasewebProvider {
    /// Create a provider with the default client factory
    ///
    /// `version` is the release version, `dev` for local builds or `test`
    /// under acceptance testing. The token is registered with
    /// [`SecretMask::global`], the mask [`crate::telemetry::init`] installs.
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_factory(version, DefaultClientFactory, SecretMask::global().clone())
    }
}

impl<F: ClientFactory> LeasewebProvider<F> {
    /// Create a provider from explicit parts
    ///
    /// `mask` should be the one the logging subscriber was built with.
    pub fn with_factory(version: impl Into<String>, factory: F, mask: SecretMask) -> Self {
        Self {
            version: version.into(),
            factory,
            mask,
            state: ProviderState::Uninitialized,
            client: None,
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    pub fn schema(&self) -> ProviderSchema {
        provider_schema()
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    /// The shared client, once configured
    pub fn client(&self) -> Option<&ClientHandle> {
        self.client.as_ref()
    }

    /// Configure from the raw provider block sent by the host
    pub fn configure_json(
        &mut self,
        config: &Value,
        unknown: Option<&Value>,
        env: &dyn EnvironmentReader,
    ) -> ConfigureResponse {
        if let Some(response) = self.reject_reconfigure() {
            return response;
        }
        match ProviderConfig::from_json(config, unknown) {
            Ok(model) => self.configure(&model, env),
            Err(diagnostics) => {
                tracing::warn!(
                    errors = diagnostics.errors().len(),
                    "Invalid Leaseweb provider configuration"
                );
                self.state = ProviderState::ConfigurationFailed;
                ConfigureResponse::failed(diagnostics)
            }
        }
    }

    /// Resolve the configuration and build the shared client
    pub fn configure(
        &mut self,
        config: &ProviderConfig,
        env: &dyn EnvironmentReader,
    ) -> ConfigureResponse {
        if let Some(response) = self.reject_reconfigure() {
            return response;
        }
        self.state = ProviderState::Configuring;

        let (resolved, mut diagnostics) = match ConfigResolver::new(env).resolve(config).into_result()
        {
            Ok(resolution) => resolution,
            Err(diagnostics) => {
                tracing::warn!(
                    errors = diagnostics.errors().len(),
                    "Leaseweb provider configuration failed"
                );
                self.state = ProviderState::ConfigurationFailed;
                return ConfigureResponse::failed(diagnostics);
            }
        };

        // Must happen before the token is attached to any span or record.
        self.mask.add(resolved.token());

        let overrides = ClientOverrides::from(&resolved);
        let span = tracing::info_span!(
            "configure",
            leaseweb_host = overrides.host.as_deref().unwrap_or_default(),
            leaseweb_scheme = overrides.scheme.as_deref().unwrap_or_default(),
            leaseweb_token = resolved.token(),
        );
        let _entered = span.enter();

        match self
            .factory
            .new_client(resolved.token(), &overrides, &self.version)
        {
            Ok(client) => {
                self.client = Some(client.clone());
                self.state = ProviderState::Configured;
                tracing::info!(success = true, "Configured Leaseweb client");
                ConfigureResponse {
                    diagnostics,
                    data_source_data: Some(client.clone()),
                    resource_data: Some(client),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to create Leaseweb client");
                diagnostics.push(Diagnostic::error(
                    "Unable to Create Leaseweb API Client",
                    format!(
                        "An unexpected error occurred when creating the Leaseweb API client. \
                         Check the host and scheme settings. Client error: {err}"
                    ),
                ));
                self.state = ProviderState::ConfigurationFailed;
                ConfigureResponse {
                    diagnostics,
                    ..Default::default()
                }
            }
        }
    }

    /// Data source constructors, independent of configuration state
    pub fn data_sources(&self) -> &'static [RegistryEntry] {
        registry::data_sources()
    }

    /// Resource constructors, independent of configuration state
    pub fn resources(&self) -> &'static [RegistryEntry] {
        registry::resources()
    }

    fn reject_reconfigure(&self) -> Option<ConfigureResponse> {
        if self.state == ProviderState::Uninitialized {
            return None;
        }
        tracing::warn!(state = %self.state, "Ignoring repeated configure call");
        Some(ConfigureResponse::failed(
            Diagnostic::error(
                "Provider already configured",
                format!(
                    "The Leaseweb provider can only be configured once per process; it is \
                     already {}. Restart the plugin to apply a new configuration.",
                    self.state
                ),
            )
            .into(),
        ))
    }
}

impl<F> fmt::Debug for LeasewebProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeasewebProvider")
            .field("version", &self.version)
            .field("state", &self.state)
            .field("client", &self.client)
            .finish()
    }
}
