//! NutanixMachineConfig - Machine template for Nutanix

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

use super::common::{
    NutanixResourceIdentifier, OS_FAMILIES, UserConfiguration, nutanix_identifier_type, users_type,
};

define_manifest_kind!(
    NutanixMachineConfig,
    kind = "NutanixMachineConfig",
    type_name = "nutanixmachineconfig",
    spec = NutanixMachineConfigSpec,
    attributes = spec_attributes,
    description = "NutanixMachineConfig is the Schema for the nutanix machine configs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixMachineConfigSpec {
    pub additional_categories: Option<Vec<NutanixCategoryIdentifier>>,
    pub boot_type: Option<String>,
    pub cluster: NutanixResourceIdentifier,
    pub gpus: Option<Vec<NutanixGpuIdentifier>>,
    pub image: NutanixResourceIdentifier,
    pub memory_size: String,
    pub os_family: String,
    pub project: Option<NutanixResourceIdentifier>,
    pub subnet: NutanixResourceIdentifier,
    pub system_disk_size: String,
    pub users: Option<Vec<UserConfiguration>>,
    pub vcpu_sockets: i64,
    pub vcpus_per_socket: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixCategoryIdentifier {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixGpuIdentifier {
    #[serde(rename(serialize = "deviceID"))]
    pub device_id: Option<i64>,
    pub name: Option<String>,
    pub r#type: String,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "additional_categories",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("key", AttributeType::String)
                    .with_description("key is the Key of the category in the Prism Central."),
                AttributeSchema::new("value", AttributeType::String)
                    .with_description("value is the category value linked to the key in the Prism Central."),
            ])),
        )
        .with_description("additionalCategories is a list of optional categories to be added to the VM."),
        AttributeSchema::new("boot_type", AttributeType::enumeration(&["legacy", "uefi"]))
            .with_description("BootType is boot type of the VM."),
        AttributeSchema::new("cluster", nutanix_identifier_type())
            .required()
            .with_description("cluster is to identify the cluster (the Prism Element under management of the Prism Central), in which the Machine's VM will be created."),
        AttributeSchema::new(
            "gpus",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("device_id", AttributeType::Int)
                    .with_wire_name("deviceID")
                    .with_description("deviceID is the device ID of the GPU device."),
                AttributeSchema::new("name", AttributeType::String)
                    .with_description("vendorID is the vendor ID of the GPU device."),
                AttributeSchema::new("type", AttributeType::enumeration(&["deviceID", "name"]))
                    .required()
                    .with_description("type is the type of the GPU device."),
            ])),
        )
        .with_description("List of GPU devices that should be added to the VMs."),
        AttributeSchema::new("image", nutanix_identifier_type())
            .required()
            .with_description("image is to identify the OS image uploaded to the Prism Central (PC)"),
        AttributeSchema::new("memory_size", types::quantity())
            .required()
            .with_description("memorySize is the memory size (in Quantity format) of the VM The minimum memorySize is 2Gi bytes"),
        AttributeSchema::new("os_family", AttributeType::enumeration(OS_FAMILIES)).required(),
        AttributeSchema::new("project", nutanix_identifier_type())
            .with_description("Project is an optional property that specifies the Prism Central project so that machine resources can be linked to it."),
        AttributeSchema::new("subnet", nutanix_identifier_type())
            .required()
            .with_description("subnet is to identify the cluster's network subnet to use for the Machine's VM"),
        AttributeSchema::new("system_disk_size", types::quantity())
            .required()
            .with_description("systemDiskSize is size (in Quantity format) of the system disk of the VM The minimum systemDiskSize is 20Gi bytes"),
        AttributeSchema::new("users", users_type()),
        AttributeSchema::new("vcpu_sockets", AttributeType::Int)
            .required()
            .with_description("vcpuSockets is the number of vCPU sockets of the VM")
            .with_validator(Validator::IntAtLeast(1)),
        AttributeSchema::new("vcpus_per_socket", AttributeType::Int)
            .required()
            .with_description("vcpusPerSocket is the number of vCPUs per socket of the VM")
            .with_validator(Validator::IntAtLeast(1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    fn by_name(name: &str) -> Value {
        Value::map([("type", Value::from("name")), ("name", Value::from(name))])
    }

    fn spec() -> Vec<(&'static str, Value)> {
        vec![
            ("cluster", by_name("pe-1")),
            ("image", by_name("ubuntu-2204-kube-v1-30")),
            ("subnet", by_name("vlan-10")),
            ("memory_size", Value::from("8Gi")),
            ("system_disk_size", Value::from("40Gi")),
            ("os_family", Value::from("ubuntu")),
            ("vcpu_sockets", Value::Int(2)),
            ("vcpus_per_socket", Value::Int(1)),
        ]
    }

    fn config(spec: Vec<(&'static str, Value)>) -> Value {
        Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("nutanix-cp")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            ("spec", Value::map(spec)),
        ])
    }

    #[test]
    fn renders_identifiers() {
        let rendered = read::<NutanixMachineConfig>(&config(spec()), &RenderConfig::default()).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered.yaml).unwrap();
        assert_eq!(parsed["spec"]["cluster"]["type"].as_str(), Some("name"));
        assert_eq!(parsed["spec"]["memorySize"].as_str(), Some("8Gi"));
        assert_eq!(parsed["spec"]["vcpusPerSocket"].as_i64(), Some(1));
    }

    #[test]
    fn memory_size_must_be_quantity() {
        let mut spec = spec();
        spec[3] = ("memory_size", Value::from("eight gigs"));
        let err = read::<NutanixMachineConfig>(&config(spec), &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("spec.memory_size"));
    }

    #[test]
    fn identifier_type_is_enum() {
        let mut spec = spec();
        spec[0] = (
            "cluster",
            Value::map([("type", Value::from("label")), ("name", Value::from("pe-1"))]),
        );
        let err = read::<NutanixMachineConfig>(&config(spec), &RenderConfig::default()).unwrap_err();
        assert!(
            err.to_string()
                .contains("spec.cluster.type: invalid value 'label', expected one of: uuid, name")
        );
    }
}
