//! FluxConfig - GitOps settings for Flux

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    FluxConfig,
    kind = "FluxConfig",
    type_name = "fluxconfig",
    spec = FluxConfigSpec,
    attributes = spec_attributes,
    description = "FluxConfig is the Schema for the fluxconfigs API and defines the configurations of the Flux GitOps Toolkit and Git repository it links to."
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct FluxConfigSpec {
    pub branch: Option<String>,
    pub cluster_config_path: Option<String>,
    pub git: Option<GitProviderConfig>,
    pub github: Option<GithubProviderConfig>,
    pub system_namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct GitProviderConfig {
    pub repository_url: String,
    pub ssh_key_algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct GithubProviderConfig {
    pub owner: String,
    pub personal: Option<bool>,
    pub repository: String,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("branch", AttributeType::String)
            .with_description("Git branch. Defaults to main."),
        AttributeSchema::new("cluster_config_path", AttributeType::String)
            .with_description("ClusterConfigPath relative to the repository root, when specified the cluster sync will be scoped to this path."),
        AttributeSchema::new(
            "git",
            AttributeType::Object(vec![
                AttributeSchema::new("repository_url", AttributeType::String)
                    .required()
                    .with_description("Repository URL for the repository to sync with the cluster."),
                AttributeSchema::new(
                    "ssh_key_algorithm",
                    AttributeType::enumeration(&["rsa", "ecdsa", "ed25519"]),
                )
                .with_description("SSH public key algorithm for the private key specified (rsa, ecdsa, ed25519) (default ecdsa)"),
            ]),
        )
        .with_description("Used to specify Git provider that will be used to host the git files"),
        AttributeSchema::new(
            "github",
            AttributeType::Object(vec![
                AttributeSchema::new("owner", AttributeType::String)
                    .required()
                    .with_description("Owner is the user or organization name of the Git provider."),
                AttributeSchema::new("personal", AttributeType::Bool)
                    .with_description("if true, the owner is assumed to be a Git user; otherwise an org."),
                AttributeSchema::new("repository", AttributeType::String)
                    .required()
                    .with_description("Repository name."),
            ]),
        )
        .with_description("Used to specify Github provider to host the Git repo and host the git files"),
        AttributeSchema::new("system_namespace", AttributeType::String)
            .with_description("SystemNamespace scope for this operation. Defaults to flux-system"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    fn metadata() -> Value {
        Value::map([
            ("name", Value::from("flux")),
            ("namespace", Value::from("default")),
        ])
    }

    #[test]
    fn spec_is_optional() {
        let config = Value::map([("metadata", metadata())]);
        let rendered = read::<FluxConfig>(&config, &RenderConfig::default()).unwrap();
        assert!(!rendered.yaml.contains("spec"));
    }

    #[test]
    fn github_requires_owner() {
        let config = Value::map([
            ("metadata", metadata()),
            (
                "spec",
                Value::map([("github", Value::map([("repository", Value::from("fleet"))]))]),
            ),
        ]);
        let err = read::<FluxConfig>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("spec.github.owner"));
    }
}
