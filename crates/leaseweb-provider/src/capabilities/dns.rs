//! DNS capabilities

use super::capability_constructors;

capability_constructors! {
    new_resource_record_sets_data_source => data_source("dns_resource_record_sets");
    new_resource_record_set_resource => resource("dns_resource_record_set");
}
