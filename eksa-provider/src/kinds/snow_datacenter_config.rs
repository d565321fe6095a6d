//! SnowDatacenterConfig - Credentials of a fleet of Snow devices

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

use super::common::Ref;

define_manifest_kind!(
    SnowDatacenterConfig,
    kind = "SnowDatacenterConfig",
    type_name = "snowdatacenterconfig",
    spec = SnowDatacenterConfigSpec,
    attributes = spec_attributes,
    description = "SnowDatacenterConfig is the Schema for the SnowDatacenterConfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SnowDatacenterConfigSpec {
    pub identity_ref: Ref,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "identity_ref",
            AttributeType::Object(vec![
                AttributeSchema::new("kind", AttributeType::String),
                AttributeSchema::new("name", AttributeType::String),
            ]),
        )
        .required()
        .with_description("IdentityRef is a reference to an identity for the Snow API to be used when reconciling this cluster"),
    ]
}
