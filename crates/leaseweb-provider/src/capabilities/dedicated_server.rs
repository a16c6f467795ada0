//! Dedicated Server capabilities

use super::capability_constructors;

capability_constructors! {
    new_server_data_source => data_source("dedicated_server");
    new_servers_data_source => data_source("dedicated_servers");
    new_control_panels_data_source => data_source("dedicated_server_control_panels");
    new_operating_systems_data_source => data_source("dedicated_server_operating_systems");
    new_credential_data_source => data_source("dedicated_server_credential");

    new_server_resource => resource("dedicated_server");
    new_credential_resource => resource("dedicated_server_credential");
    new_notification_setting_datatraffic_resource => resource("dedicated_server_notification_setting_datatraffic");
    new_notification_setting_bandwidth_resource => resource("dedicated_server_notification_setting_bandwidth");
    new_installation_resource => resource("dedicated_server_installation");
}
