//! Public Cloud capabilities

use super::capability_constructors;

capability_constructors! {
    new_instances_data_source => data_source("public_cloud_instances");
    new_credential_data_source => data_source("public_cloud_credential");
    new_images_data_source => data_source("public_cloud_images");
    new_load_balancers_data_source => data_source("public_cloud_load_balancers");
    new_load_balancer_listeners_data_source => data_source("public_cloud_load_balancer_listeners");
    new_target_groups_data_source => data_source("public_cloud_target_groups");
    new_isos_data_source => data_source("public_cloud_isos");

    new_instance_resource => resource("public_cloud_instance");
    new_credential_resource => resource("public_cloud_credential");
    new_image_resource => resource("public_cloud_image");
    new_load_balancer_resource => resource("public_cloud_load_balancer");
    new_load_balancer_listener_resource => resource("public_cloud_load_balancer_listener");
    new_target_group_resource => resource("public_cloud_target_group");
    new_ip_resource => resource("public_cloud_ip");
    new_instance_iso_resource => resource("public_cloud_instance_iso");
}
