//! Leaseweb Provider
//!
//! The provider half of the Leaseweb plugin: it publishes the provider schema,
//! resolves the provider block into a shared API client, keeps the token out
//! of every log record, and lists the data sources and resources the plugin
//! offers.
//!
//! # Modules
//!
//! - `schema`: attribute schema reported to the host
//! - `client`: client construction contract and the default factory
//! - `masking`: secret masking for log output
//! - `telemetry`: logging bootstrap
//! - `capabilities`: data source and resource constructors
//! - `registry`: the ordered capability lists
//! - `provider`: the lifecycle facade tying everything together
//!
//! # Example
//!
//! ```rust
//! use leaseweb_provider::{LeasewebProvider, MapEnvironment, ProviderConfig, TOKEN_ENV};
//!
//! let mut provider = LeasewebProvider::new("dev");
//! let env = MapEnvironment::new().with_var(TOKEN_ENV, "abc123");
//!
//! let response = provider.configure(&ProviderConfig::new(), &env);
//! assert!(!response.diagnostics.has_error());
//!
//! let client = response.resource_data.expect("configured");
//! assert_eq!(client.base_url(), "https://api.leaseweb.com");
//! ```

pub mod capabilities;
pub mod client;
pub mod masking;
pub mod provider;
pub mod registry;
pub mod schema;
pub mod telemetry;

pub use capabilities::{ApiCapability, Capability, CapabilityConstructor, CapabilityKind};
pub use client::{
    ClientError, ClientFactory, ClientHandle, ClientOverrides, DefaultClientFactory,
    LeasewebClient, DEFAULT_HOST, DEFAULT_SCHEME,
};
pub use masking::{MaskingMakeWriter, MaskingWriter, SecretMask, MASK};
pub use provider::{
    ConfigureResponse, LeasewebProvider, ProviderMetadata, ProviderState, PROVIDER_TYPE_NAME,
};
pub use registry::RegistryEntry;
pub use schema::{provider_schema, Attribute, AttributeType, ProviderSchema};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError};

pub use leaseweb_provider_config::{
    ConfigValue, Diagnostic, Diagnostics, EnvironmentReader, MapEnvironment, ProcessEnvironment,
    ProviderConfig, Severity, HOST_ENV, SCHEME_ENV, TOKEN_ENV,
};
