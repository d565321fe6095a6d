//! Schema - Define attribute schemas for data sources
//!
//! Each data source declares an attribute tree mirroring its CRD.
//! The tree is used both to describe the data source to callers and to
//! validate a configuration before it is rendered.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use heck::ToLowerCamelCase;
use thiserror::Error;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map with string keys
    Map(Box<AttributeType>),
    /// Nested block
    Object(Vec<AttributeSchema>),
}

impl AttributeType {
    pub fn list(inner: AttributeType) -> Self {
        AttributeType::List(Box::new(inner))
    }

    pub fn map(inner: AttributeType) -> Self {
        AttributeType::Map(Box::new(inner))
    }

    pub fn enumeration(values: &[&str]) -> Self {
        AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();
        self.check(value, "", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check(&self, value: &Value, path: &str, errors: &mut Vec<TypeError>) {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => {}
            (AttributeType::Int, Value::Int(_)) => {}
            (AttributeType::Bool, Value::Bool(_)) => {}

            (AttributeType::Enum(variants), Value::String(s)) => {
                if !variants.iter().any(|v| v == s) {
                    errors.push(TypeError::InvalidEnumVariant {
                        path: path.to_string(),
                        value: s.clone(),
                        expected: variants.clone(),
                    });
                }
            }

            (AttributeType::Custom { base, validate, .. }, v) => {
                let before = errors.len();
                base.check(v, path, errors);
                if errors.len() == before
                    && let Err(message) = validate(v)
                {
                    errors.push(TypeError::ValidationFailed {
                        path: path.to_string(),
                        message,
                    });
                }
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.check(item, &format!("{}[{}]", path, i), errors);
                }
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.check(v, &join_path(path, k), errors);
                }
            }

            (AttributeType::Object(attributes), Value::Map(map)) => {
                check_attributes(attributes, map, path, errors);
            }

            _ => errors.push(TypeError::TypeMismatch {
                path: path.to_string(),
                expected: self.type_name(),
                got: value.type_name().to_string(),
            }),
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(_) => "Enum".to_string(),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Object(_) => "Object".to_string(),
        }
    }

    /// Nested attributes, looking through lists of blocks
    pub fn nested_attributes(&self) -> Option<&[AttributeSchema]> {
        match self {
            AttributeType::Object(attributes) => Some(attributes),
            AttributeType::List(inner) => inner.nested_attributes(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttributeType::Enum(values) => serde_json::json!({"enum": values}),
            AttributeType::Custom { name, base, .. } => {
                serde_json::json!({"custom": name, "base": base.to_json()})
            }
            AttributeType::List(inner) => serde_json::json!({"list": inner.to_json()}),
            AttributeType::Map(inner) => serde_json::json!({"map": inner.to_json()}),
            AttributeType::Object(attributes) => serde_json::json!({
                "object": attributes_to_json(attributes),
            }),
            other => serde_json::Value::String(other.type_name().to_lowercase()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Value constraint attached to an attribute
#[derive(Debug, Clone)]
pub enum Validator {
    /// Minimum length of a string, list or map
    LengthAtLeast(usize),
    /// Maximum length of a string, list or map
    LengthAtMost(usize),
    /// Minimum integer value
    IntAtLeast(i64),
    /// Maximum integer value
    IntAtMost(i64),
    /// Named check implemented by a function
    Func {
        description: &'static str,
        check: fn(&Value) -> Result<(), String>,
    },
}

impl Validator {
    pub fn func(description: &'static str, check: fn(&Value) -> Result<(), String>) -> Self {
        Validator::Func { description, check }
    }

    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Validator::LengthAtLeast(min) => match length_of(value) {
                Some(len) if len < *min => Err(format!(
                    "length must be at least {}, got {}",
                    min, len
                )),
                _ => Ok(()),
            },
            Validator::LengthAtMost(max) => match length_of(value) {
                Some(len) if len > *max => {
                    Err(format!("length must be at most {}, got {}", max, len))
                }
                _ => Ok(()),
            },
            Validator::IntAtLeast(min) => match value {
                Value::Int(n) if n < min => {
                    Err(format!("value must be at least {}, got {}", min, n))
                }
                _ => Ok(()),
            },
            Validator::IntAtMost(max) => match value {
                Value::Int(n) if n > max => {
                    Err(format!("value must be at most {}, got {}", max, n))
                }
                _ => Ok(()),
            },
            Validator::Func { check, .. } => check(value),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Validator::LengthAtLeast(n) => format!("length >= {}", n),
            Validator::LengthAtMost(n) => format!("length <= {}", n),
            Validator::IntAtLeast(n) => format!(">= {}", n),
            Validator::IntAtMost(n) => format!("<= {}", n),
            Validator::Func { description, .. } => description.to_string(),
        }
    }
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::List(items) => Some(items.len()),
        Value::Map(map) => Some(map.len()),
        _ => None,
    }
}

/// Type error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error("{path}: type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        path: String,
        expected: String,
        got: String,
    },

    #[error("{path}: invalid value '{value}', expected one of: {}", .expected.join(", "))]
    InvalidEnumVariant {
        path: String,
        value: String,
        expected: Vec<String>,
    },

    #[error("{path}: {message}")]
    ValidationFailed { path: String, message: String },

    #[error("{path}: required attribute is missing")]
    MissingRequired { path: String },

    #[error("{path}: unknown attribute")]
    UnknownAttribute { path: String },

    #[error("{path}: attribute is computed and cannot be configured")]
    ComputedAttribute { path: String },
}

impl TypeError {
    /// Dotted configuration path of the offending attribute
    pub fn path(&self) -> &str {
        match self {
            TypeError::TypeMismatch { path, .. }
            | TypeError::InvalidEnumVariant { path, .. }
            | TypeError::ValidationFailed { path, .. }
            | TypeError::MissingRequired { path }
            | TypeError::UnknownAttribute { path }
            | TypeError::ComputedAttribute { path } => path,
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    /// Configuration name (snake_case)
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Set by the data source, never by the user
    pub computed: bool,
    pub description: Option<String>,
    /// Manifest field name, when it is not the camelCase form of `name`
    pub wire_name: Option<String>,
    pub validators: Vec<Validator>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            description: None,
            wire_name: None,
            validators: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = Some(name.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Field name used in the rendered manifest
    pub fn wire_name(&self) -> String {
        match &self.wire_name {
            Some(name) => name.clone(),
            None => self.name.to_lower_camel_case(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("type".to_string(), self.attr_type.to_json());
        obj.insert("wire_name".to_string(), self.wire_name().into());
        let mode = if self.required {
            "required"
        } else if self.computed {
            "computed"
        } else {
            "optional"
        };
        obj.insert("mode".to_string(), mode.into());
        if let Some(desc) = &self.description {
            obj.insert("description".to_string(), desc.clone().into());
        }
        if !self.validators.is_empty() {
            obj.insert(
                "validators".to_string(),
                self.validators
                    .iter()
                    .map(|v| serde_json::Value::String(v.describe()))
                    .collect(),
            );
        }
        serde_json::Value::Object(obj)
    }
}

fn attributes_to_json(attributes: &[AttributeSchema]) -> serde_json::Value {
    serde_json::Value::Object(
        attributes
            .iter()
            .map(|a| (a.name.clone(), a.to_json()))
            .collect(),
    )
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn check_attributes(
    attributes: &[AttributeSchema],
    map: &BTreeMap<String, Value>,
    path: &str,
    errors: &mut Vec<TypeError>,
) {
    for schema in attributes {
        let attr_path = join_path(path, &schema.name);
        match map.get(&schema.name) {
            None if schema.required => errors.push(TypeError::MissingRequired { path: attr_path }),
            None => {}
            Some(_) if schema.computed && !schema.required => {
                errors.push(TypeError::ComputedAttribute { path: attr_path })
            }
            Some(value) => {
                let before = errors.len();
                schema.attr_type.check(value, &attr_path, errors);
                if errors.len() > before {
                    continue;
                }
                // First failing validator only
                if let Some(message) = schema
                    .validators
                    .iter()
                    .find_map(|validator| validator.check(value).err())
                {
                    errors.push(TypeError::ValidationFailed {
                        path: attr_path,
                        message,
                    });
                }
            }
        }
    }

    for key in map.keys() {
        if !attributes.iter().any(|a| &a.name == key) {
            errors.push(TypeError::UnknownAttribute {
                path: join_path(path, key),
            });
        }
    }
}

/// Data source schema
#[derive(Debug, Clone)]
pub struct DataSourceSchema {
    pub type_name: String,
    pub attributes: Vec<AttributeSchema>,
    pub description: Option<String>,
}

impl DataSourceSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Vec::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.push(schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up a nested attribute by a dotted configuration path
    pub fn find(&self, path: &str) -> Option<&AttributeSchema> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current
                .attr_type
                .nested_attributes()?
                .iter()
                .find(|a| a.name == part)?;
        }
        Some(current)
    }

    /// Validate a configuration, collecting every error
    pub fn validate(&self, config: &Value) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();
        match config {
            Value::Map(map) => check_attributes(&self.attributes, map, "", &mut errors),
            other => errors.push(TypeError::TypeMismatch {
                path: String::new(),
                expected: "Object".to_string(),
                got: other.type_name().to_string(),
            }),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type_name": self.type_name,
            "description": self.description,
            "attributes": attributes_to_json(&self.attributes),
        })
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// List of strings
    pub fn string_list() -> AttributeType {
        AttributeType::list(AttributeType::String)
    }

    /// Map of strings
    pub fn string_map() -> AttributeType {
        AttributeType::map(AttributeType::String)
    }

    /// Kubernetes quantity (e.g. "100m", "2Gi") or plain integer string
    pub fn quantity() -> AttributeType {
        AttributeType::Custom {
            name: "Quantity".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) => validate_quantity(s),
                _ => Err("expected string".to_string()),
            },
        }
    }

    /// Integer or percentage string (e.g. "25%"), as used by rollout strategies
    pub fn int_or_percent() -> AttributeType {
        AttributeType::Custom {
            name: "IntOrPercent".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) => {
                    let digits = s.strip_suffix('%').unwrap_or(s);
                    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                        Ok(())
                    } else {
                        Err(format!(
                            "'{}' must be an integer or a percentage like '25%'",
                            s
                        ))
                    }
                }
                _ => Err("expected string".to_string()),
            },
        }
    }

    /// CIDR block type (e.g., "10.0.0.0/16")
    pub fn cidr() -> AttributeType {
        AttributeType::Custom {
            name: "Cidr".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) => validate_cidr(s),
                _ => Err("expected string".to_string()),
            },
        }
    }
}

/// Validate a Kubernetes resource quantity
pub fn validate_quantity(s: &str) -> Result<(), String> {
    const SUFFIXES: &[&str] = &[
        "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "n", "u", "m", "k", "M", "G", "T", "P", "E", "",
    ];
    let number = SUFFIXES
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .unwrap_or(s);
    let mut parts = number.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    let digits_ok = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !whole.is_empty() && digits_ok(whole) && fraction.is_none_or(|f| !f.is_empty() && digits_ok(f))
    {
        Ok(())
    } else {
        Err(format!("'{}' is not a valid quantity", s))
    }
}

/// Validate an IPv4 or IPv6 CIDR block (e.g., "10.0.0.0/16", "fd00::/56")
pub fn validate_cidr(cidr: &str) -> Result<(), String> {
    let Some((ip, prefix)) = cidr.split_once('/') else {
        return Err(format!(
            "Invalid CIDR format '{}': expected IP/prefix",
            cidr
        ));
    };

    let max = match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => 32,
        Ok(IpAddr::V6(_)) => 128,
        Err(_) => return Err(format!("Invalid IP address '{}'", ip)),
    };

    match prefix.parse::<u8>() {
        Ok(p) if p <= max => Ok(()),
        Ok(p) => Err(format!("Invalid prefix length '{}': must be 0-{}", p, max)),
        Err(_) => Err(format!(
            "Invalid prefix length '{}': must be a number",
            prefix
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> AttributeType {
        AttributeType::Object(vec![
            AttributeSchema::new("size", AttributeType::Int)
                .required()
                .with_validator(Validator::IntAtLeast(8)),
            AttributeSchema::new("device_name", AttributeType::String),
            AttributeSchema::new("type", AttributeType::enumeration(&["sbg1", "sbp1"])),
        ])
    }

    #[test]
    fn validate_basic_types() {
        assert!(AttributeType::String.validate(&Value::from("hello")).is_ok());
        assert!(AttributeType::String.validate(&Value::Int(42)).is_err());
        assert!(AttributeType::Int.validate(&Value::Int(42)).is_ok());
        assert!(AttributeType::Bool.validate(&Value::Bool(true)).is_ok());
        assert!(AttributeType::Bool.validate(&Value::from("true")).is_err());
    }

    #[test]
    fn validate_enum_type() {
        let t = AttributeType::enumeration(&["linux", "darwin", "windows"]);
        assert!(t.validate(&Value::from("linux")).is_ok());

        let errors = t.validate(&Value::from("plan9")).unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            ": invalid value 'plan9', expected one of: linux, darwin, windows"
        );
    }

    #[test]
    fn validate_list_reports_index() {
        let t = AttributeType::list(AttributeType::Int);
        let errors = t
            .validate(&Value::List(vec![Value::Int(1), Value::from("x")]))
            .unwrap_err();
        assert_eq!(errors[0].path(), "[1]");
    }

    #[test]
    fn validate_object_collects_all_errors() {
        let value = Value::map([
            ("size", Value::Int(4)),
            ("type", Value::from("nvme")),
            ("colour", Value::from("red")),
        ]);
        let errors = block().validate(&value).unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["size", "type", "colour"]);
        assert!(matches!(errors[0], TypeError::ValidationFailed { .. }));
        assert!(matches!(errors[2], TypeError::UnknownAttribute { .. }));
    }

    #[test]
    fn validate_object_missing_required() {
        let errors = block()
            .validate(&Value::map([("device_name", Value::from("/dev/sdc"))]))
            .unwrap_err();
        assert_eq!(
            errors,
            vec![TypeError::MissingRequired {
                path: "size".to_string()
            }]
        );
    }

    #[test]
    fn validators_run_only_after_type_check() {
        let schema = DataSourceSchema::new("test").attribute(
            AttributeSchema::new("name", AttributeType::String)
                .with_validator(Validator::LengthAtLeast(1)),
        );
        let errors = schema
            .validate(&Value::map([("name", Value::Int(1))]))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], TypeError::TypeMismatch { .. }));

        let errors = schema
            .validate(&Value::map([("name", Value::from(""))]))
            .unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "name: length must be at least 1, got 0"
        );
    }

    #[test]
    fn computed_attributes_cannot_be_set() {
        let schema = DataSourceSchema::new("test")
            .attribute(AttributeSchema::new("yaml", AttributeType::String).computed());
        assert!(schema.validate(&Value::map::<&str>([])).is_ok());

        let errors = schema
            .validate(&Value::map([("yaml", Value::from("x"))]))
            .unwrap_err();
        assert!(matches!(errors[0], TypeError::ComputedAttribute { .. }));
    }

    #[test]
    fn schema_find_nested() {
        let schema = DataSourceSchema::new("test")
            .attribute(AttributeSchema::new("spec", AttributeType::Object(vec![
                AttributeSchema::new("volumes", AttributeType::list(block())),
            ])));
        let size = schema.find("spec.volumes.size").unwrap();
        assert!(size.required);
        assert!(schema.find("spec.volumes.missing").is_none());
    }

    #[test]
    fn wire_name_defaults_to_camel_case() {
        let attr = AttributeSchema::new("cli_max_version", AttributeType::String);
        assert_eq!(attr.wire_name(), "cliMaxVersion");

        let attr = AttributeSchema::new("ami_id", AttributeType::String).with_wire_name("amiID");
        assert_eq!(attr.wire_name(), "amiID");
    }

    #[test]
    fn validate_quantity_values() {
        assert!(validate_quantity("100m").is_ok());
        assert!(validate_quantity("2Gi").is_ok());
        assert!(validate_quantity("1.5").is_ok());
        assert!(validate_quantity("512").is_ok());
        assert!(validate_quantity("Gi").is_err());
        assert!(validate_quantity("1.").is_err());
        assert!(validate_quantity("abc").is_err());
    }

    #[test]
    fn validate_int_or_percent() {
        let t = types::int_or_percent();
        assert!(t.validate(&Value::from("25%")).is_ok());
        assert!(t.validate(&Value::from("1")).is_ok());
        assert!(t.validate(&Value::from("%")).is_err());
        assert!(t.validate(&Value::from("a%")).is_err());
    }

    #[test]
    fn validate_cidr_type() {
        let t = types::cidr();
        assert!(t.validate(&Value::from("10.0.0.0/16")).is_ok());
        assert!(t.validate(&Value::from("192.168.0.0/16")).is_ok());
        assert!(t.validate(&Value::from("10.0.0.0")).is_err());
        assert!(t.validate(&Value::from("10.0.0.0/33")).is_err());
        assert!(t.validate(&Value::from("10.0.0.256/16")).is_err());
        assert!(t.validate(&Value::from("fd00:10:244::/56")).is_ok());
        assert!(t.validate(&Value::from("2001:db8::/129")).is_err());
        assert!(t.validate(&Value::from("fd00::1::2/64")).is_err());
        assert!(t.validate(&Value::Int(42)).is_err());
    }
}
