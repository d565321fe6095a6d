//! CloudStackMachineConfig - Machine template for CloudStack

use std::collections::BTreeMap;

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

use super::cloudstack_datacenter_config::{CloudStackResourceIdentifier, identifier_type};
use super::common::{UserConfiguration, users_type};

define_manifest_kind!(
    CloudStackMachineConfig,
    kind = "CloudStackMachineConfig",
    type_name = "cloudstackmachineconfig",
    spec = CloudStackMachineConfigSpec,
    attributes = spec_attributes,
    description = "CloudStackMachineConfig is the Schema for the cloudstackmachineconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackMachineConfigSpec {
    pub affinity: Option<String>,
    pub affinity_group_ids: Option<Vec<String>>,
    pub compute_offering: CloudStackResourceIdentifier,
    pub disk_offering: Option<CloudStackResourceDiskOffering>,
    pub symlinks: Option<BTreeMap<String, String>>,
    pub template: CloudStackResourceIdentifier,
    pub user_custom_details: Option<BTreeMap<String, String>>,
    pub users: Option<Vec<UserConfiguration>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackResourceDiskOffering {
    #[serde(rename(serialize = "customSizeInGB"))]
    pub custom_size_in_gb: Option<i64>,
    pub device: String,
    pub filesystem: String,
    pub id: Option<String>,
    pub label: String,
    pub mount_path: String,
    pub name: Option<String>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("affinity", AttributeType::enumeration(&["pro", "anti", "no"]))
            .with_description("Defaults to 'no'. Can be 'pro' or 'anti'. If set to 'pro' or 'anti', will create an affinity group per machine set."),
        AttributeSchema::new("affinity_group_ids", types::string_list())
            .with_description("AffinityGroupIds allows users to pass in a list of UUIDs for previously-created Affinity Groups."),
        AttributeSchema::new("compute_offering", identifier_type())
            .required()
            .with_description("ComputeOffering refers to a compute offering which has been previously registered in CloudStack."),
        AttributeSchema::new(
            "disk_offering",
            AttributeType::Object(vec![
                AttributeSchema::new("custom_size_in_gb", AttributeType::Int)
                    .with_wire_name("customSizeInGB")
                    .with_description("disk size in GB, > 0 for customized disk offering; = 0 for non-customized disk offering")
                    .with_validator(Validator::IntAtLeast(0)),
                AttributeSchema::new("device", AttributeType::String)
                    .required()
                    .with_description("device name of the disk offering in VM, shows up in lsblk command"),
                AttributeSchema::new("filesystem", AttributeType::String)
                    .required()
                    .with_description("filesystem used to mkfs in disk offering partition"),
                AttributeSchema::new("id", AttributeType::String),
                AttributeSchema::new("label", AttributeType::String)
                    .required()
                    .with_description("disk offering partition label"),
                AttributeSchema::new("mount_path", AttributeType::String)
                    .required()
                    .with_description("path the filesystem will use to mount in VM"),
                AttributeSchema::new("name", AttributeType::String),
            ]),
        )
        .with_description("DiskOffering refers to a disk offering which has been previously registered in CloudStack."),
        AttributeSchema::new("symlinks", types::string_map())
            .with_description("Symlinks create soft symbolic links folders."),
        AttributeSchema::new("template", identifier_type())
            .required()
            .with_description("Template refers to a VM image template which has been previously registered in CloudStack."),
        AttributeSchema::new("user_custom_details", types::string_map())
            .with_description("UserCustomDetails allows users to pass in non-standard key value inputs."),
        AttributeSchema::new("users", users_type())
            .with_description("Users consists of an array of objects containing the username, as well as a list of their public keys."),
    ]
}
