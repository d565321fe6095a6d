//! VSphereDatacenterConfig - vCenter connection settings

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    VSphereDatacenterConfig,
    kind = "VSphereDatacenterConfig",
    type_name = "vspheredatacenterconfig",
    spec = VSphereDatacenterConfigSpec,
    attributes = spec_attributes,
    description = "VSphereDatacenterConfig is the Schema for the VSphereDatacenterConfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct VSphereDatacenterConfigSpec {
    pub datacenter: String,
    pub insecure: Option<bool>,
    pub network: String,
    pub server: String,
    pub thumbprint: Option<String>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("datacenter", AttributeType::String).required(),
        AttributeSchema::new("insecure", AttributeType::Bool),
        AttributeSchema::new("network", AttributeType::String).required(),
        AttributeSchema::new("server", AttributeType::String).required(),
        AttributeSchema::new("thumbprint", AttributeType::String),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    #[test]
    fn renders_full_manifest() {
        let config = Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("dc")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            (
                "spec",
                Value::map([
                    ("datacenter", Value::from("SDDC-Datacenter")),
                    ("network", Value::from("/SDDC-Datacenter/network/sddc-cgw-network-1")),
                    ("server", Value::from("vcenter.example.com")),
                    ("insecure", Value::Bool(false)),
                ]),
            ),
        ]);
        let rendered = read::<VSphereDatacenterConfig>(&config, &RenderConfig::default()).unwrap();
        assert_eq!(
            rendered.yaml,
            "apiVersion: anywhere.eks.amazonaws.com/v1alpha1\n\
             kind: VSphereDatacenterConfig\n\
             metadata:\n  name: dc\n  namespace: default\n\
             spec:\n  datacenter: SDDC-Datacenter\n  insecure: false\n  \
             network: /SDDC-Datacenter/network/sddc-cgw-network-1\n  server: vcenter.example.com\n"
        );
    }

    #[test]
    fn server_is_required() {
        let config = Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("dc")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            (
                "spec",
                Value::map([
                    ("datacenter", Value::from("SDDC-Datacenter")),
                    ("network", Value::from("net")),
                ]),
            ),
        ]);
        let err = read::<VSphereDatacenterConfig>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("spec.server: required attribute is missing"));
    }
}
