//! Loading of data source configuration documents (YAML or JSON)

use std::fs;
use std::path::{Path, PathBuf};

use eksa_core::resource::{Value, ValueError};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration in {}: {source}", .path.display())]
    Value {
        path: PathBuf,
        #[source]
        source: ValueError,
    },
}

/// Load a configuration document from a file
pub fn load_config(path: &Path) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} ({} bytes)", path.display(), content.len());
    parse_config(&content, path)
}

/// Parse a configuration document; JSON is accepted as a subset of YAML
pub fn parse_config(content: &str, path: &Path) -> Result<Value, ConfigError> {
    let json: serde_json::Value =
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Value::from_json_object(&json).map_err(|source| ConfigError::Value {
        path: path.to_path_buf(),
        source,
    })
}
