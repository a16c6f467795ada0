//! Leaseweb Provider Configuration
//!
//! Turns the user's provider block and the process environment into a single
//! validated connection context, reporting every problem as a structured
//! diagnostic instead of an error value.
//!
//! # Modules
//!
//! - `value`: tri-state attribute values (null / unknown / known)
//! - `model`: the provider block as supplied by the host, and the resolved result
//! - `env`: injectable environment variable lookup
//! - `diagnostics`: diagnostics collected during one configure call
//! - `error`: configuration error taxonomy and its diagnostic rendering
//! - `resolver`: precedence rules and validation ordering
//!
//! # Example
//!
//! ```rust
//! use leaseweb_provider_config::{ConfigResolver, MapEnvironment, ProviderConfig, TOKEN_ENV};
//!
//! let env = MapEnvironment::new().with_var(TOKEN_ENV, "abc123");
//! let config = ProviderConfig::new().with_host("custom.example.com");
//!
//! let resolution = ConfigResolver::new(&env).resolve(&config);
//! let resolved = resolution.resolved.expect("token comes from the environment");
//!
//! assert_eq!(resolved.token(), "abc123");
//! assert_eq!(resolved.host_override(), Some("custom.example.com"));
//! assert_eq!(resolved.scheme_override(), None);
//! ```

pub mod diagnostics;
pub mod env;
pub mod error;
pub mod model;
pub mod resolver;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use env::{
    EnvironmentReader, EnvironmentReaderExt, MapEnvironment, ProcessEnvironment, HOST_ENV,
    SCHEME_ENV, TOKEN_ENV,
};
pub use error::{ConfigError, Result};
pub use model::{
    ProviderConfig, ResolvedConfig, ATTRIBUTES, HOST_ATTRIBUTE, SCHEME_ATTRIBUTE, TOKEN_ATTRIBUTE,
};
pub use resolver::{ConfigResolver, Resolution, ValueSource};
pub use value::ConfigValue;
