//! TinkerbellMachineConfig - Machine template for bare metal

use std::collections::BTreeMap;

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

use super::common::{
    HostOsConfiguration, OS_FAMILIES, Ref, UserConfiguration, host_os_configuration, ref_type,
    users_type,
};

define_manifest_kind!(
    TinkerbellMachineConfig,
    kind = "TinkerbellMachineConfig",
    type_name = "tinkerbellmachineconfig",
    spec = TinkerbellMachineConfigSpec,
    attributes = spec_attributes,
    description = "TinkerbellMachineConfig is the Schema for the tinkerbellmachineconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct TinkerbellMachineConfigSpec {
    pub hardware_selector: BTreeMap<String, String>,
    #[serde(rename(serialize = "hostOSConfiguration"))]
    pub host_os_configuration: Option<HostOsConfiguration>,
    pub os_family: String,
    #[serde(rename(serialize = "osImageURL"))]
    pub os_image_url: Option<String>,
    pub template_ref: Option<Ref>,
    pub users: Option<Vec<UserConfiguration>>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("hardware_selector", types::string_map())
            .required()
            .with_description("HardwareSelector models a simple key-value selector used in Tinkerbell provisioning.")
            .with_validator(Validator::LengthAtLeast(1)),
        host_os_configuration(),
        AttributeSchema::new("os_family", AttributeType::enumeration(OS_FAMILIES)).required(),
        AttributeSchema::new("os_image_url", AttributeType::String)
            .with_wire_name("osImageURL")
            .with_description("OSImageURL can be used to override the default OS image path to pull from a local server."),
        AttributeSchema::new("template_ref", ref_type()),
        AttributeSchema::new("users", users_type()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    fn config(selector: Value) -> Value {
        Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("bm-cp")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            (
                "spec",
                Value::map([
                    ("hardware_selector", selector),
                    ("os_family", Value::from("bottlerocket")),
                    (
                        "host_os_configuration",
                        Value::map([(
                            "bottlerocket_configuration",
                            Value::map([(
                                "kubernetes",
                                Value::map([
                                    ("max_pods", Value::Int(110)),
                                    (
                                        "cluster_dns_ips",
                                        Value::List(vec![Value::from("10.96.0.10")]),
                                    ),
                                ]),
                            )]),
                        )]),
                    ),
                ]),
            ),
        ])
    }

    #[test]
    fn renders_host_os_configuration() {
        let selector = Value::map([("type", Value::from("cp"))]);
        let rendered = read::<TinkerbellMachineConfig>(&config(selector), &RenderConfig::default()).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered.yaml).unwrap();
        let kubernetes = &parsed["spec"]["hostOSConfiguration"]["bottlerocketConfiguration"]["kubernetes"];
        assert_eq!(kubernetes["maxPods"].as_i64(), Some(110));
        assert_eq!(kubernetes["clusterDNSIPs"][0].as_str(), Some("10.96.0.10"));
        assert_eq!(parsed["spec"]["hardwareSelector"]["type"].as_str(), Some("cp"));
    }

    #[test]
    fn empty_hardware_selector_is_rejected() {
        let err = read::<TinkerbellMachineConfig>(
            &config(Value::map::<&str>([])),
            &RenderConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("spec.hardware_selector: length must be at least 1"));
    }
}
