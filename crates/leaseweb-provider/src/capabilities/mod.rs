//! Data sources and resources exposed to the host
//!
//! Each capability is a small unit the host constructs through a
//! zero-argument constructor and then configures with the shared
//! [`ClientHandle`]. Reading and CRUD behaviour live with the individual
//! API areas; this module only defines the construction contract and the
//! constructors themselves.
//!
//! # API areas
//!
//! - `public_cloud`: instances, load balancers, images, ISOs, IPs
//! - `dedicated_server`: servers, credentials, installations, notifications
//! - `dns`: resource record sets
//! - `ipmgmt`: IPs and null routes

pub mod dedicated_server;
pub mod dns;
pub mod ipmgmt;
pub mod public_cloud;

use serde::Serialize;
use std::fmt;

use leaseweb_provider_config::Diagnostics;

use crate::client::ClientHandle;

/// Whether a capability reads state or manages a resource lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    DataSource,
    Resource,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::DataSource => write!(f, "data-source"),
            CapabilityKind::Resource => write!(f, "resource"),
        }
    }
}

/// A data source or resource as seen by the provider
pub trait Capability: Send + Sync + fmt::Debug {
    fn kind(&self) -> CapabilityKind;

    /// Type name without the provider prefix, e.g. `dedicated_servers`
    fn type_suffix(&self) -> &'static str;

    /// Full type name under the given provider type name
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.type_suffix())
    }

    /// Receive the shared client
    ///
    /// The host may call this before the provider is configured, in which
    /// case `client` is `None` and nothing is reported.
    fn configure(&mut self, client: Option<ClientHandle>) -> Diagnostics;

    /// The client received in [`Capability::configure`]
    fn client(&self) -> Option<&ClientHandle>;
}

/// Zero-argument capability constructor
pub type CapabilityConstructor = fn() -> Box<dyn Capability>;

/// Capability backed by the Leaseweb API
///
/// All API areas share this shape until they carry their own schema.
#[derive(Debug)]
pub struct ApiCapability {
    kind: CapabilityKind,
    type_suffix: &'static str,
    client: Option<ClientHandle>,
}

impl ApiCapability {
    pub fn data_source(type_suffix: &'static str) -> Self {
        Self {
            kind: CapabilityKind::DataSource,
            type_suffix,
            client: None,
        }
    }

    pub fn resource(type_suffix: &'static str) -> Self {
        Self {
            kind: CapabilityKind::Resource,
            type_suffix,
            client: None,
        }
    }
}

impl Capability for ApiCapability {
    fn kind(&self) -> CapabilityKind {
        self.kind
    }

    fn type_suffix(&self) -> &'static str {
        self.type_suffix
    }

    fn configure(&mut self, client: Option<ClientHandle>) -> Diagnostics {
        match client {
            Some(client) => {
                tracing::trace!(
                    kind = %self.kind,
                    capability = self.type_suffix,
                    "Configured capability"
                );
                self.client = Some(client);
            }
            None => {
                tracing::trace!(
                    kind = %self.kind,
                    capability = self.type_suffix,
                    "Provider not configured yet, capability left without client"
                );
            }
        }
        Diagnostics::new()
    }

    fn client(&self) -> Option<&ClientHandle> {
        self.client.as_ref()
    }
}

/// Declare constructor functions for API capabilities
macro_rules! capability_constructors {
    ($($name:ident => $kind:ident($suffix:literal);)+) => {
        $(
            #[doc = concat!("Construct the `", $suffix, "` capability.")]
            pub fn $name() -> Box<dyn $crate::capabilities::Capability> {
                Box::new($crate::capabilities::ApiCapability::$kind($suffix))
            }
        )+
    };
}

pub(crate) use capability_constructors;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientFactory, ClientOverrides, DefaultClientFactory};

    #[test]
    fn test_metadata_prefixes_provider_type() {
        let capability = ApiCapability::data_source("dedicated_servers");
        assert_eq!(capability.metadata("leaseweb"), "leaseweb_dedicated_servers");
        assert_eq!(capability.kind(), CapabilityKind::DataSource);
    }

    #[test]
    fn test_configure_without_client_is_silent() {
        let mut capability = ApiCapability::resource("public_cloud_instance");
        let diags = capability.configure(None);
        assert!(diags.is_empty());
        assert!(capability.client().is_none());
    }

    #[test]
    fn test_configure_keeps_shared_handle() {
        let handle = DefaultClientFactory
            .new_client("abc123", &ClientOverrides::default(), "dev")
            .unwrap();
        let mut capability = ApiCapability::resource("public_cloud_instance");

        let diags = capability.configure(Some(handle.clone()));
        assert!(diags.is_empty());
        assert!(std::sync::Arc::ptr_eq(capability.client().unwrap(), &handle));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CapabilityKind::DataSource.to_string(), "data-source");
        assert_eq!(CapabilityKind::Resource.to_string(), "resource");
    }
}
