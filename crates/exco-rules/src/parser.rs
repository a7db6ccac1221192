//! Shared YAML/JSON loading.
//!
//! Catalogs and request documents may be authored in either format. The
//! format is chosen by file extension: `.json` parses as JSON, anything else
//! as YAML (YAML is a superset of JSON, so a misnamed JSON file still loads).
//! Parse errors carry the file path.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{RulesError, RulesResult};

/// Document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn read(path: &Path) -> RulesResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RulesError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RulesError::Io(e)
        }
    })
}

/// Load a YAML or JSON file into a strongly-typed struct.
pub fn load_typed<T: DeserializeOwned>(path: &Path) -> RulesResult<T> {
    let content = read(path)?;
    match Format::from_path(path) {
        Format::Json => serde_json::from_str(&content).map_err(|e| RulesError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        }),
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| RulesError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parse an in-memory document.
pub fn parse_typed<T: DeserializeOwned>(content: &str, format: Format) -> RulesResult<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(content)?),
        Format::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}
