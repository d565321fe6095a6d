//! EKSARelease - Maps an EKS Anywhere version to its Bundles

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    EksaRelease,
    kind = "EKSARelease",
    type_name = "eksarelease",
    spec = EksaReleaseSpec,
    attributes = spec_attributes,
    description = "EKSARelease is the mapping between release semver of EKS-A and a Bundles resource on the cluster",
    has_id = false
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct EksaReleaseSpec {
    pub bundle_manifest_url: String,
    pub bundles_ref: BundlesRef,
    pub build_date: String,
    pub git_commit: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BundlesRef {
    pub api_version: String,
    pub name: String,
    pub namespace: String,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("bundle_manifest_url", AttributeType::String)
            .required()
            .with_description("Manifest url to parse bundle information from for this EKS-A release"),
        AttributeSchema::new(
            "bundles_ref",
            AttributeType::Object(vec![
                AttributeSchema::new("api_version", AttributeType::String)
                    .required()
                    .with_description("APIVersion refers to the Bundles APIVersion"),
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .with_description("Name refers to the name of the Bundles object in the cluster"),
                AttributeSchema::new("namespace", AttributeType::String)
                    .required()
                    .with_description("Namespace refers to the Bundles's namespace"),
            ]),
        )
        .required()
        .with_description("Reference to a Bundles resource in the cluster"),
        AttributeSchema::new("build_date", AttributeType::String)
            .required()
            .with_description("Date of EKS-A Release"),
        AttributeSchema::new("git_commit", AttributeType::String)
            .required()
            .with_description("Git commit the component is built from, before any patches"),
        AttributeSchema::new("version", AttributeType::String)
            .required()
            .with_description("EKS-A release semantic version"),
    ]
}
