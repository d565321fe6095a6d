//! CloudStackDatacenterConfig - CloudStack availability zones

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    CloudStackDatacenterConfig,
    kind = "CloudStackDatacenterConfig",
    type_name = "cloudstackdatacenterconfig",
    spec = CloudStackDatacenterConfigSpec,
    attributes = spec_attributes,
    description = "CloudStackDatacenterConfig is the Schema for the cloudstackdatacenterconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackDatacenterConfigSpec {
    pub account: Option<String>,
    pub availability_zones: Option<Vec<CloudStackAvailabilityZone>>,
    pub domain: Option<String>,
    pub management_api_endpoint: Option<String>,
    pub zones: Option<Vec<CloudStackZone>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackAvailabilityZone {
    pub account: Option<String>,
    pub credentials_ref: String,
    pub domain: String,
    pub management_api_endpoint: String,
    pub name: String,
    pub zone: CloudStackZone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackZone {
    pub id: Option<String>,
    pub name: Option<String>,
    pub network: CloudStackResourceIdentifier,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackResourceIdentifier {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Object identified by id or name
pub fn identifier_type() -> AttributeType {
    AttributeType::Object(vec![
        AttributeSchema::new("id", AttributeType::String)
            .with_description("Id of a resource in the CloudStack environment."),
        AttributeSchema::new("name", AttributeType::String)
            .with_description("Name of a resource in the CloudStack environment."),
    ])
}

fn zone_type() -> AttributeType {
    AttributeType::Object(vec![
        AttributeSchema::new("id", AttributeType::String)
            .with_description("Zone is the name or UUID of the CloudStack zone in which clusters should be created."),
        AttributeSchema::new("name", AttributeType::String),
        AttributeSchema::new("network", identifier_type())
            .required()
            .with_description("Network is the name or UUID of the CloudStack network in which clusters should be created."),
    ])
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("account", AttributeType::String)
            .with_description("Account typically represents a customer of the service provider. Deprecated: Please use AvailabilityZones instead"),
        AttributeSchema::new(
            "availability_zones",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("account", AttributeType::String).with_description(
                    "Account typically represents a customer of the service provider or a department in a large organization.",
                ),
                AttributeSchema::new("credentials_ref", AttributeType::String)
                    .required()
                    .with_description("CredentialRef is used to reference a secret in the eksa-system namespace"),
                AttributeSchema::new("domain", AttributeType::String)
                    .required()
                    .with_description("Domain contains a grouping of accounts."),
                AttributeSchema::new("management_api_endpoint", AttributeType::String)
                    .required()
                    .with_description("CloudStack Management API endpoint's IP. It is added to VM's noproxy list"),
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .with_description("Name is used as a unique identifier for each availability zone"),
                AttributeSchema::new("zone", zone_type())
                    .required()
                    .with_description("Zone represents the properties of the CloudStack zone in which clusters should be created."),
            ])),
        )
        .with_description("AvailabilityZones list of different partitions to distribute VMs across."),
        AttributeSchema::new("domain", AttributeType::String)
            .with_description("Domain contains a grouping of accounts. Deprecated: Please use AvailabilityZones instead"),
        AttributeSchema::new("management_api_endpoint", AttributeType::String)
            .with_description("CloudStack Management API endpoint's IP. Deprecated: Please use AvailabilityZones instead"),
        AttributeSchema::new("zones", AttributeType::list(zone_type()))
            .with_description("Zones is a list of one or more zones that are managed by a single CloudStack management endpoint. Deprecated: Please use AvailabilityZones instead"),
    ]
}
