//! Resource - Configuration values supplied to a data source

use std::collections::BTreeMap;

use thiserror::Error;

/// Attribute value of a data source configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// Errors raised when a document cannot be represented as a [`Value`]
#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("Unsupported number '{0}' at '{1}': only integers are allowed")]
    UnsupportedNumber(String, String),

    #[error("Expected an object at the top level, got {0}")]
    NotAnObject(String),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Build a map value from `(key, value)` pairs
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a nested attribute by a dotted path (e.g. "metadata.name")
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(self, |value, key| value.as_map()?.get(key))
    }

    /// Convert to JSON, keeping configuration (snake_case) keys
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Convert from JSON; `null`s are dropped as unset attributes.
    ///
    /// Returns `Ok(None)` for a top-level `null`.
    pub fn from_json(json: &serde_json::Value) -> Result<Option<Value>, ValueError> {
        Self::from_json_at(json, "")
    }

    /// Convert a top-level JSON object into a configuration map
    pub fn from_json_object(json: &serde_json::Value) -> Result<Value, ValueError> {
        match Self::from_json(json)? {
            Some(value @ Value::Map(_)) => Ok(value),
            Some(other) => Err(ValueError::NotAnObject(other.type_name().to_string())),
            None => Err(ValueError::NotAnObject("null".to_string())),
        }
    }

    fn from_json_at(json: &serde_json::Value, path: &str) -> Result<Option<Value>, ValueError> {
        let value = match json {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => {
                    return Err(ValueError::UnsupportedNumber(
                        n.to_string(),
                        path.to_string(),
                    ));
                }
            },
            serde_json::Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    if let Some(v) = Self::from_json_at(item, &format!("{}[{}]", path, i))? {
                        list.push(v);
                    }
                }
                Value::List(list)
            }
            serde_json::Value::Object(obj) => {
                let mut map = BTreeMap::new();
                for (k, v) in obj {
                    let child = if path.is_empty() {
                        k.clone()
                    } else {
                        format!("{}.{}", path, k)
                    };
                    if let Some(v) = Self::from_json_at(v, &child)? {
                        map.insert(k.clone(), v);
                    }
                }
                Value::Map(map)
            }
        };
        Ok(Some(value))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_drops_nulls() {
        let value = Value::from_json_object(&json!({
            "metadata": {"name": "foo", "labels": null},
            "spec": null,
        }))
        .unwrap();

        assert_eq!(
            value,
            Value::map([("metadata", Value::map([("name", Value::from("foo"))]))])
        );
    }

    #[test]
    fn from_json_rejects_floats_with_path() {
        let err = Value::from_json_object(&json!({"spec": {"size": 1.5}})).unwrap_err();
        assert_eq!(
            err,
            ValueError::UnsupportedNumber("1.5".to_string(), "spec.size".to_string())
        );
    }

    #[test]
    fn from_json_object_requires_object() {
        let err = Value::from_json_object(&json!(["a"])).unwrap_err();
        assert_eq!(err, ValueError::NotAnObject("List".to_string()));
    }

    #[test]
    fn to_json_keeps_keys() {
        let value = Value::map([
            ("cli_max_version", Value::from("1.0")),
            ("number", Value::Int(1)),
            ("tags", Value::List(vec![Value::from("a")])),
        ]);
        assert_eq!(
            value.to_json(),
            json!({"cli_max_version": "1.0", "number": 1, "tags": ["a"]})
        );
    }

    #[test]
    fn get_path_walks_maps() {
        let value = Value::map([("metadata", Value::map([("name", Value::from("foo"))]))]);
        assert_eq!(value.get_path("metadata.name"), Some(&Value::from("foo")));
        assert_eq!(value.get_path("metadata.namespace"), None);
        assert_eq!(value.get_path("metadata.name.inner"), None);
    }
}
