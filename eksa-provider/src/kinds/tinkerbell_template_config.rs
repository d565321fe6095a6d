//! TinkerbellTemplateConfig - Provisioning workflow for bare metal machines

use std::collections::BTreeMap;

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    TinkerbellTemplateConfig,
    kind = "TinkerbellTemplateConfig",
    type_name = "tinkerbelltemplateconfig",
    spec = TinkerbellTemplateConfigSpec,
    attributes = spec_attributes,
    description = "TinkerbellTemplateConfig is the Schema for the TinkerbellTemplateConfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct TinkerbellTemplateConfigSpec {
    pub template: Option<Workflow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Workflow {
    #[serde(rename(serialize = "global_timeout"))]
    pub global_timeout: Option<i64>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub tasks: Option<Vec<Task>>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Task {
    pub actions: Option<Vec<Action>>,
    pub environment: Option<BTreeMap<String, String>>,
    pub name: String,
    pub volumes: Option<Vec<String>>,
    pub worker: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Action {
    pub command: Option<Vec<String>>,
    pub environment: Option<BTreeMap<String, String>>,
    pub image: String,
    pub name: String,
    #[serde(rename(serialize = "on-failure"))]
    pub on_failure: Option<Vec<String>>,
    #[serde(rename(serialize = "on-timeout"))]
    pub on_timeout: Option<Vec<String>>,
    pub pid: Option<String>,
    pub timeout: Option<i64>,
    pub volumes: Option<Vec<String>>,
}

fn action_type() -> AttributeType {
    AttributeType::Object(vec![
        AttributeSchema::new("command", types::string_list()),
        AttributeSchema::new("environment", types::string_map()),
        AttributeSchema::new("image", AttributeType::String).required(),
        AttributeSchema::new("name", AttributeType::String).required(),
        AttributeSchema::new("on_failure", types::string_list()).with_wire_name("on-failure"),
        AttributeSchema::new("on_timeout", types::string_list()).with_wire_name("on-timeout"),
        AttributeSchema::new("pid", AttributeType::String),
        AttributeSchema::new("timeout", AttributeType::Int).with_validator(Validator::IntAtLeast(0)),
        AttributeSchema::new("volumes", types::string_list()),
    ])
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "template",
            AttributeType::Object(vec![
                AttributeSchema::new("global_timeout", AttributeType::Int)
                    .with_wire_name("global_timeout")
                    .with_validator(Validator::IntAtLeast(0)),
                AttributeSchema::new("id", AttributeType::String),
                AttributeSchema::new("name", AttributeType::String),
                AttributeSchema::new(
                    "tasks",
                    AttributeType::list(AttributeType::Object(vec![
                        AttributeSchema::new("actions", AttributeType::list(action_type())),
                        AttributeSchema::new("environment", types::string_map()),
                        AttributeSchema::new("name", AttributeType::String).required(),
                        AttributeSchema::new("volumes", types::string_list()),
                        AttributeSchema::new("worker", AttributeType::String).required(),
                    ])),
                ),
                AttributeSchema::new("version", AttributeType::String),
            ]),
        )
        .with_description("Template defines a Tinkerbell workflow template with specific tasks and actions."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    #[test]
    fn keeps_workflow_key_spelling() {
        let config = Value::map([
            (
                "metadata",
                Value::map([
                    ("name", Value::from("bm-template")),
                    ("namespace", Value::from("default")),
                ]),
            ),
            (
                "spec",
                Value::map([(
                    "template",
                    Value::map([
                        ("global_timeout", Value::Int(6000)),
                        ("name", Value::from("bm-template")),
                        ("version", Value::from("0.1")),
                        (
                            "tasks",
                            Value::List(vec![Value::map([
                                ("name", Value::from("bm-template")),
                                ("worker", Value::from("{{.device_1}}")),
                                (
                                    "actions",
                                    Value::List(vec![Value::map([
                                        ("name", Value::from("stream-image")),
                                        ("image", Value::from("image2disk:v1.0.0")),
                                        ("timeout", Value::Int(600)),
                                        ("on_failure", Value::List(vec![Value::from("reboot")])),
                                    ])]),
                                ),
                            ])]),
                        ),
                    ]),
                )]),
            ),
        ]);
        let rendered = read::<TinkerbellTemplateConfig>(&config, &RenderConfig::default()).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered.yaml).unwrap();
        let template = &parsed["spec"]["template"];
        assert_eq!(template["global_timeout"].as_i64(), Some(6000));
        assert_eq!(template["tasks"][0]["worker"].as_str(), Some("{{.device_1}}"));
        assert_eq!(
            template["tasks"][0]["actions"][0]["on-failure"][0].as_str(),
            Some("reboot")
        );
    }
}
