//! Capability registry
//!
//! The two ordered lists of capability constructors published to the host.
//! Both lists are fixed at compile time: the same entries, in the same order,
//! on every call and regardless of whether configuration succeeded.

use crate::capabilities::{
    dedicated_server, dns, ipmgmt, public_cloud, Capability, CapabilityConstructor,
    CapabilityKind,
};

/// A capability kind paired with its constructor
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub kind: CapabilityKind,
    pub constructor: CapabilityConstructor,
}

impl RegistryEntry {
    pub const fn data_source(constructor: CapabilityConstructor) -> Self {
        Self {
            kind: CapabilityKind::DataSource,
            constructor,
        }
    }

    pub const fn resource(constructor: CapabilityConstructor) -> Self {
        Self {
            kind: CapabilityKind::Resource,
            constructor,
        }
    }

    /// Build a fresh capability instance
    pub fn construct(&self) -> Box<dyn Capability> {
        (self.constructor)()
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("kind", &self.kind)
            .field("type_suffix", &self.construct().type_suffix())
            .finish()
    }
}

static DATA_SOURCES: [RegistryEntry; 15] = [
    RegistryEntry::data_source(public_cloud::new_instances_data_source),
    RegistryEntry::data_source(public_cloud::new_credential_data_source),
    RegistryEntry::data_source(dedicated_server::new_server_data_source),
    RegistryEntry::data_source(dedicated_server::new_servers_data_source),
    RegistryEntry::data_source(dedicated_server::new_control_panels_data_source),
    RegistryEntry::data_source(dedicated_server::new_operating_systems_data_source),
    RegistryEntry::data_source(dedicated_server::new_credential_data_source),
    RegistryEntry::data_source(public_cloud::new_images_data_source),
    RegistryEntry::data_source(public_cloud::new_load_balancers_data_source),
    RegistryEntry::data_source(public_cloud::new_load_balancer_listeners_data_source),
    RegistryEntry::data_source(public_cloud::new_target_groups_data_source),
    RegistryEntry::data_source(public_cloud::new_isos_data_source),
    RegistryEntry::data_source(dns::new_resource_record_sets_data_source),
    RegistryEntry::data_source(ipmgmt::new_ips_data_source),
    RegistryEntry::data_source(ipmgmt::new_null_route_history_data_source),
];

static RESOURCES: [RegistryEntry; 16] = [
    RegistryEntry::resource(public_cloud::new_instance_resource),
    RegistryEntry::resource(public_cloud::new_credential_resource),
    RegistryEntry::resource(dedicated_server::new_server_resource),
    RegistryEntry::resource(dedicated_server::new_credential_resource),
    RegistryEntry::resource(dedicated_server::new_notification_setting_datatraffic_resource),
    RegistryEntry::resource(dedicated_server::new_notification_setting_bandwidth_resource),
    RegistryEntry::resource(dedicated_server::new_installation_resource),
    RegistryEntry::resource(public_cloud::new_image_resource),
    RegistryEntry::resource(public_cloud::new_load_balancer_resource),
    RegistryEntry::resource(public_cloud::new_load_balancer_listener_resource),
    RegistryEntry::resource(public_cloud::new_target_group_resource),
    RegistryEntry::resource(public_cloud::new_ip_resource),
    RegistryEntry::resource(public_cloud::new_instance_iso_resource),
    RegistryEntry::resource(dns::new_resource_record_set_resource),
    RegistryEntry::resource(ipmgmt::new_ip_resource),
    RegistryEntry::resource(ipmgmt::new_null_route_resource),
];

/// Read-only capabilities, in registration order
pub fn data_sources() -> &'static [RegistryEntry] {
    &DATA_SOURCES
}

/// Mutable-lifecycle capabilities, in registration order
pub fn resources() -> &'static [RegistryEntry] {
    &RESOURCES
}

/// Full type names of `entries` under `provider_type_name`
pub fn type_names(provider_type_name: &str, entries: &[RegistryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.construct().metadata(provider_type_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entry_counts() {
        assert_eq!(data_sources().len(), 15);
        assert_eq!(resources().len(), 16);
    }

    #[test]
    fn test_entry_kinds_match_list() {
        for entry in data_sources() {
            assert_eq!(entry.kind, CapabilityKind::DataSource);
            assert_eq!(entry.construct().kind(), CapabilityKind::DataSource);
        }
        for entry in resources() {
            assert_eq!(entry.kind, CapabilityKind::Resource);
            assert_eq!(entry.construct().kind(), CapabilityKind::Resource);
        }
    }

    #[test]
    fn test_type_names_unique_per_kind() {
        for entries in [data_sources(), resources()] {
            let names = type_names("leaseweb", entries);
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len());
        }
    }

    #[test]
    fn test_registration_order() {
        let data_sources = type_names("leaseweb", data_sources());
        assert_eq!(data_sources.first().unwrap(), "leaseweb_public_cloud_instances");
        assert_eq!(data_sources.last().unwrap(), "leaseweb_ipmgmt_null_route_history");

        let resources = type_names("leaseweb", resources());
        assert_eq!(resources.first().unwrap(), "leaseweb_public_cloud_instance");
        assert_eq!(resources.last().unwrap(), "leaseweb_ipmgmt_null_route");
    }

    #[test]
    fn test_debug_names_capability() {
        let rendered = format!("{:?}", data_sources()[3]);
        assert!(rendered.contains("dedicated_servers"));
    }
}
