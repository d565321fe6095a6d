//! NutanixDatacenterConfig - Prism Central endpoint and failure domains

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use eksa_core::validation::validate_dns1123_label;
use serde::{Deserialize, Serialize};

use super::common::{NutanixResourceIdentifier, Ref, nutanix_identifier_type, ref_type};

define_manifest_kind!(
    NutanixDatacenterConfig,
    kind = "NutanixDatacenterConfig",
    type_name = "nutanixdatacenterconfig",
    spec = NutanixDatacenterConfigSpec,
    attributes = spec_attributes,
    description = "NutanixDatacenterConfig is the Schema for the NutanixDatacenterConfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixDatacenterConfigSpec {
    pub additional_trust_bundle: Option<String>,
    #[serde(rename(serialize = "ccmExcludeNodeIPs"))]
    pub ccm_exclude_node_ips: Option<Vec<String>>,
    pub credential_ref: Option<Ref>,
    pub endpoint: String,
    pub failure_domains: Option<Vec<NutanixDatacenterFailureDomain>>,
    pub insecure: Option<bool>,
    pub port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixDatacenterFailureDomain {
    pub cluster: NutanixResourceIdentifier,
    pub name: String,
    pub subnets: Vec<NutanixResourceIdentifier>,
    pub worker_machine_groups: Option<Vec<String>>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("additional_trust_bundle", AttributeType::String)
            .with_description("AdditionalTrustBundle is the optional PEM-encoded certificate bundle for users that configured their Prism Central with certificates from non-publicly trusted CAs"),
        AttributeSchema::new("ccm_exclude_node_ips", types::string_list())
            .with_wire_name("ccmExcludeNodeIPs")
            .with_description("CcmExcludeIPs is the optional list of IP addresses that should be excluded from the CCM IP pool for nodes. List should be valid IP addresses and IP address ranges."),
        AttributeSchema::new("credential_ref", ref_type())
            .with_description("CredentialRef is the reference to the secret name that contains the credentials for the Nutanix Prism Central."),
        AttributeSchema::new("endpoint", AttributeType::String)
            .required()
            .with_description("Endpoint is the Endpoint of Nutanix Prism Central"),
        AttributeSchema::new(
            "failure_domains",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("cluster", nutanix_identifier_type())
                    .required()
                    .with_description("Cluster is the Prism Element cluster name or uuid that is connected to the Prism Central."),
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .with_description("Name is the unique name of the failure domain.")
                    .with_validator(Validator::LengthAtLeast(1))
                    .with_validator(Validator::func(
                        "DNS-1123 label",
                        |value| match value.as_str() {
                            Some(name) => validate_dns1123_label(name),
                            None => Ok(()),
                        },
                    )),
                AttributeSchema::new("subnets", AttributeType::list(nutanix_identifier_type()))
                    .required()
                    .with_description("Subnets holds the list of subnets identifiers cluster's network subnets."),
                AttributeSchema::new("worker_machine_groups", types::string_list())
                    .with_description("Worker Machine Groups holds the list of worker machine group names that will use this failure domain."),
            ])),
        )
        .with_description("FailureDomains is the optional list of failure domains for the Nutanix Datacenter.")
        .with_validator(Validator::LengthAtMost(5)),
        AttributeSchema::new("insecure", AttributeType::Bool)
            .with_description("Insecure is the optional flag to skip TLS verification."),
        AttributeSchema::new("port", AttributeType::Int)
            .required()
            .with_description("Port is the Port of Nutanix Prism Central")
            .with_validator(Validator::IntAtLeast(1))
            .with_validator(Validator::IntAtMost(65535)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    fn config(spec: Value) -> Value {
        Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("nutanix")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            ("spec", spec),
        ])
    }

    #[test]
    fn renders_endpoint_and_port() {
        let config = config(Value::map([
            ("endpoint", Value::from("prism.example.com")),
            ("port", Value::Int(9440)),
            ("ccm_exclude_node_ips", Value::List(vec![Value::from("10.0.0.1")])),
        ]));
        let rendered = read::<NutanixDatacenterConfig>(&config, &RenderConfig::default()).unwrap();
        assert!(rendered.yaml.contains("endpoint: prism.example.com\n"));
        assert!(rendered.yaml.contains("port: 9440\n"));
        assert!(rendered.yaml.contains("ccmExcludeNodeIPs:\n"));
    }

    #[test]
    fn port_out_of_range() {
        let config = config(Value::map([
            ("endpoint", Value::from("prism.example.com")),
            ("port", Value::Int(70000)),
        ]));
        let err = read::<NutanixDatacenterConfig>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("spec.port: value must be at most 65535"));
    }
}
