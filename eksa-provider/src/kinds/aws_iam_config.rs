//! AWSIamConfig - AWS IAM authenticator settings

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    AwsIamConfig,
    kind = "AWSIamConfig",
    type_name = "awsiamconfig",
    spec = AwsIamConfigSpec,
    attributes = spec_attributes,
    description = "AWSIamConfig is the Schema for the awsiamconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct AwsIamConfigSpec {
    pub aws_region: String,
    pub backend_mode: Vec<String>,
    pub map_roles: Option<Vec<MapRoles>>,
    pub map_users: Option<Vec<MapUsers>>,
    pub partition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct MapRoles {
    pub groups: Option<Vec<String>>,
    #[serde(rename(serialize = "roleARN"))]
    pub role_arn: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct MapUsers {
    pub groups: Option<Vec<String>>,
    #[serde(rename(serialize = "userARN"))]
    pub user_arn: String,
    pub username: String,
}

fn mapping(arn: &str, wire_name: &str, description: &str) -> AttributeType {
    AttributeType::list(AttributeType::Object(vec![
        AttributeSchema::new("groups", types::string_list())
            .with_description("Kubernetes groups the identity is mapped into."),
        AttributeSchema::new(arn, AttributeType::String)
            .required()
            .with_wire_name(wire_name)
            .with_description(description),
        AttributeSchema::new("username", AttributeType::String)
            .required()
            .with_description("Kubernetes user name the identity is mapped to."),
    ]))
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("aws_region", AttributeType::String)
            .required()
            .with_description("AWSRegion defines a region in an AWS partition"),
        AttributeSchema::new(
            "backend_mode",
            AttributeType::list(AttributeType::enumeration(&[
                "EKSConfigMap",
                "CRD",
                "MountedFile",
            ])),
        )
        .required()
        .with_description("BackendMode defines multiple backends for aws-iam-authenticator server")
        .with_validator(Validator::LengthAtLeast(1)),
        AttributeSchema::new(
            "map_roles",
            mapping("role_arn", "roleARN", "ARN of the IAM role."),
        ),
        AttributeSchema::new(
            "map_users",
            mapping("user_arn", "userARN", "ARN of the IAM user."),
        ),
        AttributeSchema::new("partition", AttributeType::String)
            .with_description("Partition defines the AWS partition on which the IAM roles exist"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    #[test]
    fn renders_arn_wire_names() {
        let config = Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("iam")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            (
                "spec",
                Value::map([
                    ("aws_region", Value::from("us-west-2")),
                    ("backend_mode", Value::List(vec![Value::from("EKSConfigMap")])),
                    (
                        "map_roles",
                        Value::List(vec![Value::map([
                            ("role_arn", Value::from("arn:aws:iam::1:role/admin")),
                            ("username", Value::from("admin")),
                            ("groups", Value::List(vec![Value::from("system:masters")])),
                        ])]),
                    ),
                ]),
            ),
        ]);
        let rendered = read::<AwsIamConfig>(&config, &RenderConfig::default()).unwrap();
        assert!(rendered.yaml.contains("roleARN: arn:aws:iam::1:role/admin"));
        assert!(rendered.yaml.contains("awsRegion: us-west-2"));
        assert!(!rendered.yaml.contains("mapUsers"));
    }
}
