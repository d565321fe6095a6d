//! SnowIPPool - Static IP ranges for Snow direct network interfaces

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    SnowIpPool,
    kind = "SnowIPPool",
    type_name = "snowippool",
    spec = SnowIpPoolSpec,
    attributes = spec_attributes,
    description = "SnowIPPool is the Schema for the SnowIPPools API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SnowIpPoolSpec {
    pub pools: Option<Vec<IpPool>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct IpPool {
    pub gateway: Option<String>,
    pub ip_end: Option<String>,
    pub ip_start: Option<String>,
    pub subnet: Option<String>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "pools",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("gateway", AttributeType::String)
                    .with_description("Gateway is the gateway of the subnet for routing purpose."),
                AttributeSchema::new("ip_end", AttributeType::String)
                    .with_description("IPEnd is the end address of an ip range."),
                AttributeSchema::new("ip_start", AttributeType::String)
                    .with_description("IPStart is the start address of an ip range."),
                AttributeSchema::new("subnet", AttributeType::String)
                    .with_description("Subnet is used to determine whether an ip is within subnet."),
            ])),
        )
        .with_description("IPPools defines a list of ip pool for the DNI."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    #[test]
    fn renders_pool_ranges() {
        let config = Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("pool-1")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            (
                "spec",
                Value::map([(
                    "pools",
                    Value::List(vec![Value::map([
                        ("ip_start", Value::from("192.168.1.10")),
                        ("ip_end", Value::from("192.168.1.50")),
                        ("gateway", Value::from("192.168.1.1")),
                        ("subnet", Value::from("192.168.1.0/24")),
                    ])]),
                )]),
            ),
        ]);
        let rendered = read::<SnowIpPool>(&config, &RenderConfig::default()).unwrap();
        assert!(rendered.yaml.contains("kind: SnowIPPool\n"));
        assert!(rendered.yaml.contains(
            "  pools:\n  - gateway: 192.168.1.1\n    ipEnd: 192.168.1.50\n    ipStart: 192.168.1.10\n    subnet: 192.168.1.0/24\n"
        ));
    }
}
