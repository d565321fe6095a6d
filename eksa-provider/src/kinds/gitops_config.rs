//! GitOpsConfig - Legacy GitOps settings

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    GitOpsConfig,
    kind = "GitOpsConfig",
    type_name = "gitopsconfig",
    spec = GitOpsConfigSpec,
    attributes = spec_attributes,
    description = "GitOpsConfig is the Schema for the gitopsconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct GitOpsConfigSpec {
    pub flux: Option<Flux>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Flux {
    pub github: Option<Github>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Github {
    pub branch: Option<String>,
    pub cluster_config_path: Option<String>,
    pub flux_system_namespace: Option<String>,
    pub owner: String,
    pub personal: Option<bool>,
    pub repository: String,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![AttributeSchema::new(
        "flux",
        AttributeType::Object(vec![AttributeSchema::new(
            "github",
            AttributeType::Object(vec![
                AttributeSchema::new("branch", AttributeType::String)
                    .with_description("Git branch. Defaults to main."),
                AttributeSchema::new("cluster_config_path", AttributeType::String)
                    .with_description("ClusterConfigPath relative to the repository root."),
                AttributeSchema::new("flux_system_namespace", AttributeType::String)
                    .with_description("FluxSystemNamespace scope for this operation. Defaults to flux-system."),
                AttributeSchema::new("owner", AttributeType::String).required(),
                AttributeSchema::new("personal", AttributeType::Bool),
                AttributeSchema::new("repository", AttributeType::String).required(),
            ]),
        )]),
    )]
}
