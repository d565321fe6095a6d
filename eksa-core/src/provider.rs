//! Provider - Traits abstracting data sources
//!
//! A Provider groups the data sources it can serve. Each data source is a
//! pure function from a configuration to a rendered manifest.

use crate::manifest::{ReadError, RenderConfig, RenderedManifest};
use crate::resource::Value;
use crate::schema::DataSourceSchema;

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub message: String,
    pub data_source: Option<String>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref data_source) = self.data_source {
            write!(f, "[{}] {}", data_source, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data_source: None,
            cause: None,
        }
    }

    pub fn for_data_source(mut self, type_name: impl Into<String>) -> Self {
        self.data_source = Some(type_name.into());
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The read error that caused this failure, if any
    pub fn read_error(&self) -> Option<&ReadError> {
        self.cause.as_ref()?.downcast_ref::<ReadError>()
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// A read-only data source
pub trait DataSource: Send + Sync {
    /// Data source type name as used in configuration
    fn type_name(&self) -> &'static str;

    /// `apiVersion` injected into every manifest
    fn api_version(&self) -> &'static str;

    /// `kind` injected into every manifest
    fn kind(&self) -> &'static str;

    /// Whether a computed `id` is exposed
    fn has_id(&self) -> bool;

    /// Attribute schema for this data source
    fn schema(&self) -> DataSourceSchema;

    /// Validate the configuration and render it
    fn read(&self, config: &Value, render: &RenderConfig) -> Result<RenderedManifest, ReadError>;
}

/// Main Provider trait
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "k8s")
    fn name(&self) -> &'static str;

    /// Data sources this Provider can serve
    fn data_sources(&self) -> Vec<Box<dyn DataSource>>;

    /// Find a data source by type name
    fn data_source(&self, type_name: &str) -> ProviderResult<Box<dyn DataSource>> {
        self.data_sources()
            .into_iter()
            .find(|ds| ds.type_name() == type_name)
            .ok_or_else(|| {
                ProviderError::new(format!(
                    "Unknown data source type '{}' for provider '{}'",
                    type_name,
                    self.name()
                ))
            })
    }

    /// Read a data source by type name
    fn read(
        &self,
        type_name: &str,
        config: &Value,
        render: &RenderConfig,
    ) -> ProviderResult<RenderedManifest> {
        let data_source = self.data_source(type_name)?;
        data_source.read(config, render).map_err(|e| {
            let message = if e.is_validation() {
                "Configuration is invalid"
            } else {
                "Failed to render manifest"
            };
            ProviderError::new(message)
                .for_data_source(type_name)
                .with_cause(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestDataSource;
    use crate::manifest::ManifestKind;
    use crate::schema::{AttributeSchema, AttributeType};

    struct Note;

    impl ManifestKind for Note {
        const TYPE_NAME: &'static str = "mock_note_manifest";
        const API_VERSION: &'static str = "example.com/v1";
        const KIND: &'static str = "Note";
        type Spec = serde_json::Value;

        fn description() -> String {
            "Note".to_string()
        }

        fn spec_attributes() -> Vec<AttributeSchema> {
            vec![AttributeSchema::new("text", AttributeType::String).required()]
        }
    }

    // Mock Provider for testing
    struct MockProvider;

    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
            vec![Box::new(ManifestDataSource::<Note>::new())]
        }
    }

    fn config(spec: Value) -> Value {
        Value::map([
            (
                "metadata",
                Value::map([("name", Value::from("a")), ("namespace", Value::from("b"))]),
            ),
            ("spec", spec),
        ])
    }

    #[test]
    fn unknown_data_source_type() {
        let err = MockProvider
            .read("mock_other", &config(Value::map::<&str>([])), &RenderConfig::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown data source type 'mock_other' for provider 'mock'"
        );
        assert!(err.read_error().is_none());
    }

    #[test]
    fn read_wraps_validation_errors() {
        let err = MockProvider
            .read(
                "mock_note_manifest",
                &config(Value::map::<&str>([])),
                &RenderConfig::default(),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "[mock_note_manifest] Configuration is invalid");
        assert!(err.read_error().unwrap().is_validation());
    }

    #[test]
    fn read_renders_manifest() {
        let rendered = MockProvider
            .read(
                "mock_note_manifest",
                &config(Value::map([("text", Value::from("hi"))])),
                &RenderConfig::default(),
            )
            .unwrap();
        assert_eq!(rendered.id.as_deref(), Some("b/a"));
        assert!(rendered.yaml.contains("kind: Note"));
        assert!(rendered.yaml.contains("text: hi"));
    }
}
