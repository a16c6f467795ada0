//! IP management capabilities

use super::capability_constructors;

capability_constructors! {
    new_ips_data_source => data_source("ipmgmt_ips");
    new_null_route_history_data_source => data_source("ipmgmt_null_route_history");

    new_ip_resource => resource("ipmgmt_ip");
    new_null_route_resource => resource("ipmgmt_null_route");
}
