//! SnowMachineConfig - Machine template for AWS Snow devices

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

use super::common::{HostOsConfiguration, OS_FAMILIES, Ref, host_os_configuration, ref_type};

define_manifest_kind!(
    SnowMachineConfig,
    kind = "SnowMachineConfig",
    type_name = "snowmachineconfig",
    spec = SnowMachineConfigSpec,
    attributes = spec_attributes,
    description = "SnowMachineConfig is the Schema for the SnowMachineConfigs API"
);

/// Smallest volume size, in GiB, a Snow device accepts
pub const MIN_VOLUME_SIZE: i64 = 8;

const VOLUME_TYPES: &[&str] = &["sbg1", "sbp1"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SnowMachineConfigSpec {
    #[serde(rename(serialize = "amiID"))]
    pub ami_id: Option<String>,
    pub containers_volume: Option<Volume>,
    pub devices: Option<Vec<String>>,
    #[serde(rename(serialize = "hostOSConfiguration"))]
    pub host_os_configuration: Option<HostOsConfiguration>,
    pub instance_type: Option<String>,
    pub network: Option<SnowNetwork>,
    pub non_root_volumes: Option<Vec<NonRootVolume>>,
    pub os_family: Option<String>,
    pub physical_network_connector: Option<String>,
    pub ssh_key_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Volume {
    pub device_name: Option<String>,
    pub size: i64,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NonRootVolume {
    pub device_name: String,
    pub size: i64,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SnowNetwork {
    pub direct_network_interfaces: Option<Vec<SnowDirectNetworkInterface>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SnowDirectNetworkInterface {
    pub dhcp: Option<bool>,
    pub index: Option<i64>,
    pub ip_pool_ref: Option<Ref>,
    pub primary: Option<bool>,
    #[serde(rename(serialize = "vlanID"))]
    pub vlan_id: Option<i64>,
}

fn volume_size() -> AttributeSchema {
    AttributeSchema::new("size", AttributeType::Int)
        .required()
        .with_description("Size of the volume in GiB.")
        .with_validator(Validator::IntAtLeast(MIN_VOLUME_SIZE))
}

fn volume_type() -> AttributeSchema {
    AttributeSchema::new("type", AttributeType::enumeration(VOLUME_TYPES))
        .with_description("Type of the volume: sbp1 for SSD, sbg1 for HDD.")
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("ami_id", AttributeType::String)
            .with_wire_name("amiID")
            .with_description(
                "The AMI ID from which to create the machine instance.",
            ),
        AttributeSchema::new(
            "containers_volume",
            AttributeType::Object(vec![
                AttributeSchema::new("device_name", AttributeType::String)
                    .with_description("Device name of the volume, for example /dev/sdc."),
                volume_size(),
                volume_type(),
            ]),
        )
        .with_description(
            "Configures a persistent volume used to store container images; required for Ubuntu.",
        ),
        AttributeSchema::new("devices", types::string_list())
            .with_description("IPs or hostnames of the Snow devices the machines should be deployed to."),
        host_os_configuration(),
        AttributeSchema::new("instance_type", AttributeType::String)
            .with_description("The type of the machine instance, for example sbe-c.large."),
        AttributeSchema::new(
            "network",
            AttributeType::Object(vec![
                AttributeSchema::new(
                    "direct_network_interfaces",
                    AttributeType::list(AttributeType::Object(vec![
                        AttributeSchema::new("dhcp", AttributeType::Bool).with_description(
                            "Whether DHCP is used to assign the IP of the interface.",
                        ),
                        AttributeSchema::new("index", AttributeType::Int)
                            .with_description("Index of the interface, starting from 1.")
                            .with_validator(Validator::IntAtLeast(1))
                            .with_validator(Validator::IntAtMost(8)),
                        AttributeSchema::new("ip_pool_ref", ref_type())
                            .with_description("Reference to the SnowIPPool used for static IPs."),
                        AttributeSchema::new("primary", AttributeType::Bool)
                            .with_description("Whether this is the primary interface."),
                        AttributeSchema::new("vlan_id", AttributeType::Int)
                            .with_wire_name("vlanID")
                            .with_description("VLAN to tag the traffic of the interface with."),
                    ])),
                )
                .with_description("Direct network interfaces of the machine."),
            ]),
        )
        .with_description("Network configuration of the machine."),
        AttributeSchema::new(
            "non_root_volumes",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("device_name", AttributeType::String)
                    .required()
                    .with_description("Device name of the volume, for example /dev/sdc."),
                volume_size(),
                volume_type(),
            ])),
        )
        .with_description("Additional non-root volumes attached to the machine."),
        AttributeSchema::new("os_family", AttributeType::enumeration(OS_FAMILIES))
            .with_description("OS family of the machine."),
        AttributeSchema::new(
            "physical_network_connector",
            AttributeType::enumeration(&["SFP_PLUS", "QSFP", "RJ45"]),
        )
        .with_description("Physical network connector type to use for creating direct network interfaces."),
        AttributeSchema::new("ssh_key_name", AttributeType::String)
            .with_description("Name of the SSH key pair used to access the machine."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{ReadError, RenderConfig, read};
    use eksa_core::resource::Value;

    fn config(spec: Value) -> Value {
        Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("snow-cp")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            ("spec", spec),
        ])
    }

    #[test]
    fn small_containers_volume_is_rejected() {
        let config = config(Value::map([(
            "containers_volume",
            Value::map([("size", Value::Int(4))]),
        )]));
        let err = read::<SnowMachineConfig>(&config, &RenderConfig::default()).unwrap_err();
        let ReadError::Validation(errors) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "spec.containers_volume.size");
        assert!(errors[0].to_string().contains("at least 8"));
    }

    #[test]
    fn renders_wire_names() {
        let config = config(Value::map([
            ("ami_id", Value::from("ami-123")),
            ("instance_type", Value::from("sbe-c.large")),
            (
                "containers_volume",
                Value::map([("size", Value::Int(8)), ("type", Value::from("sbp1"))]),
            ),
            (
                "network",
                Value::map([(
                    "direct_network_interfaces",
                    Value::List(vec![Value::map([
                        ("index", Value::Int(1)),
                        ("vlan_id", Value::Int(12)),
                        ("primary", Value::Bool(true)),
                    ])]),
                )]),
            ),
        ]));
        let rendered = read::<SnowMachineConfig>(&config, &RenderConfig::default()).unwrap();
        assert!(rendered.yaml.contains("amiID: ami-123\n"));
        assert!(rendered.yaml.contains("vlanID: 12\n"));
        assert!(rendered.yaml.contains("containersVolume:\n    size: 8\n    type: sbp1\n"));
        assert_eq!(rendered.id.as_deref(), Some("default/snow-cp"));
    }

    #[test]
    fn non_root_volume_needs_device_name() {
        let config = config(Value::map([(
            "non_root_volumes",
            Value::List(vec![Value::map([("size", Value::Int(10))])]),
        )]));
        let err = read::<SnowMachineConfig>(&config, &RenderConfig::default()).unwrap_err();
        assert!(
            err.to_string()
                .contains("spec.non_root_volumes[0].device_name: required attribute is missing")
        );
    }
}
