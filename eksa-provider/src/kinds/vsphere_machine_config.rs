//! VSphereMachineConfig - Machine template for vSphere

use eksa_core::schema::{AttributeSchema, AttributeType, types};
use serde::{Deserialize, Serialize};

use super::common::{
    HostOsConfiguration, OS_FAMILIES, UserConfiguration, host_os_configuration, users_type,
};

define_manifest_kind!(
    VSphereMachineConfig,
    kind = "VSphereMachineConfig",
    type_name = "vspheremachineconfig",
    spec = VSphereMachineConfigSpec,
    attributes = spec_attributes,
    description = "VSphereMachineConfig is the Schema for the vspheremachineconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct VSphereMachineConfigSpec {
    pub clone_mode: Option<String>,
    pub datastore: String,
    #[serde(rename(serialize = "diskGiB"))]
    pub disk_gib: Option<i64>,
    pub folder: Option<String>,
    #[serde(rename(serialize = "hostOSConfiguration"))]
    pub host_os_configuration: Option<HostOsConfiguration>,
    #[serde(rename(serialize = "memoryMiB"))]
    pub memory_mib: Option<i64>,
    #[serde(rename(serialize = "numCPUs"))]
    pub num_cpus: Option<i64>,
    pub os_family: String,
    pub resource_pool: String,
    pub storage_policy_name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub template: Option<String>,
    pub users: Option<Vec<UserConfiguration>>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "clone_mode",
            AttributeType::enumeration(&["fullClone", "linkedClone"]),
        ),
        AttributeSchema::new("datastore", AttributeType::String).required(),
        AttributeSchema::new("disk_gib", AttributeType::Int)
            .with_wire_name("diskGiB"),
        AttributeSchema::new("folder", AttributeType::String),
        host_os_configuration(),
        AttributeSchema::new("memory_mib", AttributeType::Int)
            .with_wire_name("memoryMiB"),
        AttributeSchema::new("num_cpus", AttributeType::Int)
            .with_wire_name("numCPUs"),
        AttributeSchema::new("os_family", AttributeType::enumeration(OS_FAMILIES)).required(),
        AttributeSchema::new("resource_pool", AttributeType::String).required(),
        AttributeSchema::new("storage_policy_name", AttributeType::String),
        AttributeSchema::new("tags", types::string_list()),
        AttributeSchema::new("template", AttributeType::String),
        AttributeSchema::new("users", users_type()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    fn config(extra: Vec<(&'static str, Value)>) -> Value {
        let mut spec = vec![
            ("datastore", Value::from("/SDDC-Datacenter/datastore/WorkloadDatastore")),
            ("os_family", Value::from("ubuntu")),
            ("resource_pool", Value::from("*/Resources")),
        ];
        spec.extend(extra);
        Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("vsphere-cp")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            ("spec", Value::map(spec)),
        ])
    }

    #[test]
    fn renders_unit_suffixes() {
        let config = config(vec![
            ("disk_gib", Value::Int(25)),
            ("memory_mib", Value::Int(8192)),
            ("num_cpus", Value::Int(2)),
            (
                "users",
                Value::List(vec![Value::map([
                    ("name", Value::from("capv")),
                    ("ssh_authorized_keys", Value::List(vec![Value::from("ssh-rsa AAAA")])),
                ])]),
            ),
        ]);
        let rendered = read::<VSphereMachineConfig>(&config, &RenderConfig::default()).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered.yaml).unwrap();
        let spec = &parsed["spec"];
        assert_eq!(spec["diskGiB"].as_i64(), Some(25));
        assert_eq!(spec["memoryMiB"].as_i64(), Some(8192));
        assert_eq!(spec["numCPUs"].as_i64(), Some(2));
        assert_eq!(spec["users"][0]["sshAuthorizedKeys"][0].as_str(), Some("ssh-rsa AAAA"));
    }

    #[test]
    fn sizes_are_unbounded() {
        let config = config(vec![
            ("disk_gib", Value::Int(0)),
            ("memory_mib", Value::Int(0)),
            ("num_cpus", Value::Int(0)),
        ]);
        let rendered = read::<VSphereMachineConfig>(&config, &RenderConfig::default()).unwrap();
        assert!(rendered.yaml.contains("  diskGiB: 0\n"));
        assert!(rendered.yaml.contains("  numCPUs: 0\n"));
    }

    #[test]
    fn unknown_os_family() {
        let config = config(vec![("os_family", Value::from("windows"))]);
        let err = read::<VSphereMachineConfig>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains(
            "spec.os_family: invalid value 'windows', expected one of: bottlerocket, ubuntu, redhat"
        ));
    }
}
