//! Manifest - Render a data source configuration as a Kubernetes manifest
//!
//! Every CRD kind is described by a [`ManifestKind`]: two constants injected
//! into the manifest (`apiVersion`, `kind`), a strongly-typed spec and the
//! schema of that spec. A single driver ([`read`]) validates the
//! configuration, maps it onto the typed spec and serializes it to YAML.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::DataSource;
use crate::resource::Value;
use crate::schema::{AttributeSchema, AttributeType, DataSourceSchema, TypeError, Validator};
use crate::validation::{
    validate_dns1123_label, validate_dns1123_subdomain, validate_label_value,
    validate_qualified_name,
};

/// Error raised by a data source read
#[derive(Debug, Error)]
pub enum ReadError {
    /// The configuration does not satisfy the schema
    #[error("invalid configuration:\n{}", format_errors(.0))]
    Validation(Vec<TypeError>),

    /// The configuration could not be turned into a manifest
    #[error("failed to serialize manifest: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ReadError {
    fn serialization(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReadError::Validation(_))
    }
}

fn format_errors(errors: &[TypeError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rendering options
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Start the output with a `---` document marker
    pub document_separator: bool,

    /// Comment emitted above the manifest, one `#` line per input line
    pub header: Option<String>,
}

impl RenderConfig {
    fn decorate(&self, yaml: String) -> String {
        let mut out = String::new();
        if self.document_separator {
            out.push_str("---\n");
        }
        if let Some(header) = &self.header {
            for line in header.lines() {
                out.push_str(&format!("# {}\n", line));
            }
        }
        out.push_str(&yaml);
        out
    }
}

/// Object metadata shared by every kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// A CRD kind rendered by a manifest data source
pub trait ManifestKind: Send + Sync + 'static {
    /// Data source type name (e.g. "k8s_anywhere_eks_amazonaws_com_cluster_v1alpha1_manifest")
    const TYPE_NAME: &'static str;
    /// Group/version (e.g. "anywhere.eks.amazonaws.com/v1alpha1")
    const API_VERSION: &'static str;
    /// CRD kind name (e.g. "Cluster")
    const KIND: &'static str;
    /// Whether the data source exposes a computed `id`
    const HAS_ID: bool = true;

    type Spec: Serialize + DeserializeOwned;

    fn description() -> String;

    /// Attributes of the `spec` block
    fn spec_attributes() -> Vec<AttributeSchema>;

    fn compute_id(metadata: &ObjectMeta) -> Option<String> {
        Self::HAS_ID.then(|| format!("{}/{}", metadata.namespace, metadata.name))
    }
}

/// Output of a successful read
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedManifest {
    pub id: Option<String>,
    pub yaml: String,
}

impl RenderedManifest {
    /// Resulting data source state: the configuration plus computed attributes
    pub fn to_state(&self, config: &Value) -> Value {
        let mut state = config.as_map().cloned().unwrap_or_default();
        if let Some(id) = &self.id {
            state.insert("id".to_string(), Value::String(id.clone()));
        }
        state.insert("yaml".to_string(), Value::String(self.yaml.clone()));
        Value::Map(state)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a, S> {
    api_version: &'static str,
    kind: &'static str,
    metadata: &'a ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    spec: Option<&'a S>,
}

/// Schema of the `metadata` block
pub fn metadata_schema() -> AttributeSchema {
    AttributeSchema::new(
        "metadata",
        AttributeType::Object(vec![
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Unique identifier for this object.")
                .with_validator(Validator::LengthAtLeast(1))
                .with_validator(Validator::func("DNS-1123 subdomain", |v| match v {
                    Value::String(s) => validate_dns1123_subdomain(s),
                    _ => Ok(()),
                })),
            // Label rather than subdomain: the API server limits namespaces to 63 characters
            AttributeSchema::new("namespace", AttributeType::String)
                .required()
                .with_description("Namespace the object belongs to.")
                .with_validator(Validator::LengthAtLeast(1))
                .with_validator(Validator::func("DNS-1123 label", |v| match v {
                    Value::String(s) => validate_dns1123_label(s),
                    _ => Ok(()),
                })),
            AttributeSchema::new("labels", AttributeType::map(AttributeType::String))
                .with_description("Map of string keys and values used to organize and categorize objects.")
                .with_validator(Validator::func("valid label keys and values", validate_labels)),
            AttributeSchema::new("annotations", AttributeType::map(AttributeType::String))
                .with_description("Unstructured key value map stored with a resource.")
                .with_validator(Validator::func("valid annotation keys", validate_annotations)),
        ]),
    )
    .required()
    .with_description("Data that helps uniquely identify the object.")
}

fn validate_labels(value: &Value) -> Result<(), String> {
    let Value::Map(map) = value else {
        return Ok(());
    };
    for (key, value) in map {
        validate_qualified_name(key).map_err(|e| format!("invalid label key {}", e))?;
        if let Value::String(s) = value {
            validate_label_value(s).map_err(|e| format!("invalid label value {}", e))?;
        }
    }
    Ok(())
}

fn validate_annotations(value: &Value) -> Result<(), String> {
    let Value::Map(map) = value else {
        return Ok(());
    };
    for key in map.keys() {
        validate_qualified_name(key).map_err(|e| format!("invalid annotation key {}", e))?;
    }
    Ok(())
}

/// Full data source schema for a kind
pub fn schema<K: ManifestKind>() -> DataSourceSchema {
    let spec_attributes = K::spec_attributes();
    let spec_required = spec_attributes.iter().any(|a| a.required);

    let mut spec = AttributeSchema::new("spec", AttributeType::Object(spec_attributes))
        .with_description(format!("Desired state of the {}.", K::KIND));
    if spec_required {
        spec = spec.required();
    }

    let mut schema = DataSourceSchema::new(K::TYPE_NAME).with_description(K::description());
    if K::HAS_ID {
        schema = schema.attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("The unique ID of this data source, as 'namespace/name'."),
        );
    }
    schema
        .attribute(
            AttributeSchema::new("yaml", AttributeType::String)
                .computed()
                .with_description("The generated manifest in YAML format."),
        )
        .attribute(metadata_schema())
        .attribute(spec)
}

/// Validate a configuration and render it as a manifest
pub fn read<K: ManifestKind>(
    config: &Value,
    render: &RenderConfig,
) -> Result<RenderedManifest, ReadError> {
    debug!("{}: validating configuration", K::TYPE_NAME);
    schema::<K>()
        .validate(config)
        .map_err(ReadError::Validation)?;

    let metadata: ObjectMeta = decode(config.get_path("metadata"), "metadata")?
        .ok_or_else(|| ReadError::Validation(vec![TypeError::MissingRequired {
            path: "metadata".to_string(),
        }]))?;
    let spec: Option<K::Spec> = decode(config.get_path("spec"), "spec")?;

    debug!(
        "{}: rendering {} {}/{}",
        K::TYPE_NAME,
        K::KIND,
        metadata.namespace,
        metadata.name
    );
    let manifest = Manifest {
        api_version: K::API_VERSION,
        kind: K::KIND,
        metadata: &metadata,
        spec: spec.as_ref(),
    };
    let yaml = render.decorate(to_yaml(&manifest)?);
    trace!("{}: rendered {} bytes", K::TYPE_NAME, yaml.len());

    Ok(RenderedManifest {
        id: K::compute_id(&metadata),
        yaml,
    })
}

fn decode<T: DeserializeOwned>(value: Option<&Value>, what: &str) -> Result<Option<T>, ReadError> {
    value
        .map(|v| {
            serde_json::from_value(v.to_json())
                .map_err(|e| ReadError::serialization(format!("cannot map {}", what), e))
        })
        .transpose()
}

/// Serialize to YAML with sorted keys; nulls and empty lists are omitted
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, ReadError> {
    let json = serde_json::to_value(value)
        .map_err(|e| ReadError::serialization("cannot encode manifest", e))?;
    let canonical = canonicalize(&json).unwrap_or(serde_yaml::Value::Null);
    serde_yaml::to_string(&canonical)
        .map_err(|e| ReadError::serialization("cannot encode manifest as YAML", e))
}

fn canonicalize(json: &serde_json::Value) -> Option<serde_yaml::Value> {
    match json {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(serde_yaml::Value::Bool(*b)),
        serde_json::Value::Number(n) => Some(if let Some(i) = n.as_i64() {
            serde_yaml::Value::Number(i.into())
        } else if let Some(u) = n.as_u64() {
            serde_yaml::Value::Number(u.into())
        } else {
            serde_yaml::Value::Number(n.as_f64().unwrap_or_default().into())
        }),
        serde_json::Value::String(s) => Some(serde_yaml::Value::String(s.clone())),
        serde_json::Value::Array(items) => {
            let items: Vec<_> = items.iter().filter_map(canonicalize).collect();
            (!items.is_empty()).then_some(serde_yaml::Value::Sequence(items))
        }
        serde_json::Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let mut mapping = serde_yaml::Mapping::new();
            for key in keys {
                if let Some(v) = canonicalize(&obj[key.as_str()]) {
                    mapping.insert(serde_yaml::Value::String(key.clone()), v);
                }
            }
            Some(serde_yaml::Value::Mapping(mapping))
        }
    }
}

/// Data source backed by a [`ManifestKind`]
pub struct ManifestDataSource<K>(PhantomData<K>);

impl<K: ManifestKind> ManifestDataSource<K> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<K: ManifestKind> Default for ManifestDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ManifestKind> DataSource for ManifestDataSource<K> {
    fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn api_version(&self) -> &'static str {
        K::API_VERSION
    }

    fn kind(&self) -> &'static str {
        K::KIND
    }

    fn has_id(&self) -> bool {
        K::HAS_ID
    }

    fn schema(&self) -> DataSourceSchema {
        schema::<K>()
    }

    fn read(&self, config: &Value, render: &RenderConfig) -> Result<RenderedManifest, ReadError> {
        read::<K>(config, render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
    struct WidgetSpec {
        replica_count: Option<i64>,
        image_tags: Option<Vec<String>>,
        extra: Option<BTreeMap<String, String>>,
        marker: Option<Marker>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Marker {}

    struct Widget;

    impl ManifestKind for Widget {
        const TYPE_NAME: &'static str = "test_widget_manifest";
        const API_VERSION: &'static str = "example.com/v1";
        const KIND: &'static str = "Widget";
        type Spec = WidgetSpec;

        fn description() -> String {
            "Widget".to_string()
        }

        fn spec_attributes() -> Vec<AttributeSchema> {
            vec![
                AttributeSchema::new("replica_count", AttributeType::Int)
                    .with_validator(Validator::IntAtLeast(1)),
                AttributeSchema::new("image_tags", AttributeType::list(AttributeType::String)),
                AttributeSchema::new("extra", AttributeType::map(AttributeType::String)),
                AttributeSchema::new("marker", AttributeType::Object(vec![])),
            ]
        }
    }

    struct Singleton;

    impl ManifestKind for Singleton {
        const TYPE_NAME: &'static str = "test_singleton_manifest";
        const API_VERSION: &'static str = "example.com/v1";
        const KIND: &'static str = "Singleton";
        const HAS_ID: bool = false;
        type Spec = WidgetSpec;

        fn description() -> String {
            "Singleton".to_string()
        }

        fn spec_attributes() -> Vec<AttributeSchema> {
            Widget::spec_attributes()
        }
    }

    fn metadata(name: &str, namespace: &str) -> Value {
        Value::map([
            ("name", Value::from(name)),
            ("namespace", Value::from(namespace)),
        ])
    }

    fn config(spec: Value) -> Value {
        Value::map([("metadata", metadata("foo", "bar")), ("spec", spec)])
    }

    #[test]
    fn renders_constants_metadata_and_spec() {
        let rendered = read::<Widget>(
            &config(Value::map([("replica_count", Value::Int(3))])),
            &RenderConfig::default(),
        )
        .unwrap();

        assert_eq!(
            rendered.yaml,
            "apiVersion: example.com/v1\n\
             kind: Widget\n\
             metadata:\n  name: foo\n  namespace: bar\n\
             spec:\n  replicaCount: 3\n"
        );
        assert_eq!(rendered.id.as_deref(), Some("bar/foo"));
    }

    #[test]
    fn omits_unset_and_empty_lists_but_keeps_empty_blocks() {
        let rendered = read::<Widget>(
            &config(Value::map([
                ("image_tags", Value::List(vec![])),
                ("marker", Value::map::<&str>([])),
            ])),
            &RenderConfig::default(),
        )
        .unwrap();

        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered.yaml).unwrap();
        let spec = parsed.get("spec").unwrap().as_mapping().unwrap();
        assert_eq!(spec.len(), 1);
        assert!(spec.contains_key("marker"));
        assert!(!rendered.yaml.contains("null"));
        assert!(!rendered.yaml.contains("imageTags"));
    }

    #[test]
    fn spec_is_omitted_when_not_configured() {
        let rendered = read::<Widget>(
            &Value::map([("metadata", metadata("foo", "bar"))]),
            &RenderConfig::default(),
        )
        .unwrap();
        assert!(!rendered.yaml.contains("spec"));
    }

    #[test]
    fn keys_are_sorted() {
        let mut config = config(Value::map([(
            "extra",
            Value::map([("zeta", Value::from("1")), ("alpha", Value::from("2"))]),
        )]));
        if let Value::Map(map) = &mut config {
            map.insert(
                "metadata".to_string(),
                Value::map([
                    ("name", Value::from("foo")),
                    ("namespace", Value::from("bar")),
                    ("labels", Value::map([("b", Value::from("x")), ("a", Value::from("y"))])),
                ]),
            );
        }
        let yaml = read::<Widget>(&config, &RenderConfig::default()).unwrap().yaml;
        assert!(yaml.find("alpha").unwrap() < yaml.find("zeta").unwrap());
        assert!(yaml.find("  a: y").unwrap() < yaml.find("  b: x").unwrap());
        assert!(yaml.find("labels").unwrap() < yaml.find("  name: foo").unwrap());
    }

    #[test]
    fn singleton_has_no_id() {
        let rendered = read::<Singleton>(&config(Value::map::<&str>([])), &RenderConfig::default())
            .unwrap();
        assert_eq!(rendered.id, None);
        assert!(schema::<Singleton>().get("id").is_none());
        assert!(schema::<Widget>().get("id").unwrap().computed);
    }

    #[test]
    fn empty_name_is_a_validation_error() {
        let config = Value::map([("metadata", metadata("", "bar"))]);
        let err = read::<Widget>(&config, &RenderConfig::default()).unwrap_err();
        let ReadError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "metadata.name: length must be at least 1, got 0"
        );
    }

    #[test]
    fn namespace_follows_label_rules() {
        let dotted = Value::map([("metadata", metadata("foo", "team.prod"))]);
        let err = read::<Widget>(&dotted, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("metadata.namespace"));

        let dotted_name = Value::map([("metadata", metadata("foo.bar", "team"))]);
        assert!(read::<Widget>(&dotted_name, &RenderConfig::default()).is_ok());
    }

    #[test]
    fn invalid_label_key_is_rejected() {
        let config = Value::map([(
            "metadata",
            Value::map([
                ("name", Value::from("foo")),
                ("namespace", Value::from("bar")),
                ("labels", Value::map([("bad key", Value::from("x"))])),
            ]),
        )]);
        let err = read::<Widget>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("metadata.labels: invalid label key"));
    }

    #[test]
    fn user_cannot_set_computed_yaml() {
        let mut config = config(Value::map::<&str>([]));
        if let Value::Map(map) = &mut config {
            map.insert("yaml".to_string(), Value::from("apiVersion: v1"));
        }
        let err = read::<Widget>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("yaml: attribute is computed"));
    }

    #[test]
    fn render_config_decorates_output() {
        let render = RenderConfig {
            document_separator: true,
            header: Some("generated\nby test".to_string()),
        };
        let yaml = read::<Widget>(&config(Value::map::<&str>([])), &render)
            .unwrap()
            .yaml;
        assert!(yaml.starts_with("---\n# generated\n# by test\napiVersion: example.com/v1\n"));
    }

    #[test]
    fn read_is_deterministic() {
        let config = config(Value::map([
            ("replica_count", Value::Int(2)),
            ("image_tags", Value::List(vec![Value::from("a"), Value::from("b")])),
        ]));
        let first = read::<Widget>(&config, &RenderConfig::default()).unwrap();
        let second = read::<Widget>(&config, &RenderConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn to_state_adds_computed_attributes() {
        let config = config(Value::map::<&str>([]));
        let rendered = read::<Widget>(&config, &RenderConfig::default()).unwrap();
        let state = rendered.to_state(&config);
        assert_eq!(state.get_path("id"), Some(&Value::from("bar/foo")));
        assert_eq!(state.get_path("yaml"), Some(&Value::String(rendered.yaml)));
        assert_eq!(state.get_path("metadata.name"), Some(&Value::from("foo")));
    }

    #[test]
    fn data_source_exposes_kind_constants() {
        let ds = ManifestDataSource::<Widget>::new();
        assert_eq!(ds.type_name(), "test_widget_manifest");
        assert_eq!(ds.api_version(), "example.com/v1");
        assert_eq!(ds.kind(), "Widget");
        assert!(ds.has_id());
        assert!(ds.schema().get("metadata").unwrap().required);
        assert!(!ds.schema().get("spec").unwrap().required);
    }
}
